/// Runtime configuration for a flyerscout run.
///
/// All fields come from environment variables with sensible defaults for
/// the Kitchener-Waterloo region the tool was written for; see
/// [`crate::load_app_config`].
#[derive(Clone)]
pub struct AppConfig {
    /// Postal code scoping every catalog request to a region.
    pub postal_code: String,
    /// Session id the flyer-data endpoints expect.
    pub sid: String,
    pub search_base_url: String,
    pub data_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Zero-shot classification endpoint. When unset, only literal
    /// substring matching is available.
    pub classifier_url: Option<String>,
    /// Minimum classifier confidence for a candidate to count as a match.
    pub classifier_threshold: f32,
    /// Channel URL the digest is POSTed to. When unset, the digest is
    /// printed but never dispatched.
    pub notify_url: Option<String>,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("postal_code", &self.postal_code)
            .field("sid", &"[redacted]")
            .field("search_base_url", &self.search_base_url)
            .field("data_base_url", &self.data_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("classifier_url", &self.classifier_url)
            .field("classifier_threshold", &self.classifier_threshold)
            .field(
                "notify_url",
                &self.notify_url.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .finish()
    }
}
