use thiserror::Error;

/// Errors surfaced by the discovery pipeline.
///
/// Every variant aborts the current `discover` call immediately; there is no
/// partial-result salvage across merchants. Empty results are not errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A catalog fetch or parse failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] flyerscout_catalog::CatalogError),

    /// A price field was present but unparsable. This is a hard error on
    /// purpose: it means the remote schema changed and must be visible.
    #[error("unparsable price for {context}: {reason}")]
    Price { context: String, reason: String },

    /// The zero-shot classifier failed or returned a malformed ranking.
    #[error("classifier error: {0}")]
    Classify(String),

    /// The notification channel rejected the digest.
    #[error("notification delivery rejected with status {status}: {body}")]
    Delivery { status: u16, body: String },

    /// Network or TLS failure outside the catalog client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
