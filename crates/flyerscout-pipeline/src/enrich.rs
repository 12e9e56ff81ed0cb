//! Per-item enrichment: detail fetch, price normalization, summary logging.
//!
//! Enrichment performs one detail fetch per candidate, strictly in sequence.
//! There is no batch endpoint; a future batched implementation slots in here
//! without touching ranking or filtering.

use flyerscout_catalog::{CatalogClient, ItemDetail, RawPrice};

use crate::error::PipelineError;
use crate::types::MatchedItem;

/// Fetches detail for one candidate and turns it into a [`MatchedItem`].
///
/// Returns `Ok(None)` when the detail record has no usable name; such
/// candidates never produce output.
///
/// # Errors
///
/// Propagates catalog failures and rejects unparsable prices via
/// [`PipelineError::Price`].
pub(crate) async fn enrich_listing(
    client: &CatalogClient,
    item_id: &str,
) -> Result<Option<MatchedItem>, PipelineError> {
    let detail = client.item_detail(item_id).await?;

    let Some(name) = detail.name.as_deref().filter(|n| !n.is_empty()) else {
        tracing::debug!(item_id, "detail record has no name, skipping");
        return Ok(None);
    };

    let price = normalize_price(detail.current_price.as_ref(), name)?;
    tracing::info!(item_id, "{}", sale_summary(name, &detail));

    Ok(Some(MatchedItem {
        name: name.to_string(),
        price,
        sale_story: detail.sale_story.clone().unwrap_or_default(),
        merchant: detail.merchant.clone().unwrap_or_default(),
    }))
}

/// Normalizes a wire price to a finite non-negative `f64`.
///
/// Absent or empty-string prices become the `0.0` sentinel. Anything else
/// must parse cleanly; a junk, negative, or non-finite value is a hard
/// [`PipelineError::Price`] because it signals a remote schema change.
pub(crate) fn normalize_price(
    raw: Option<&RawPrice>,
    context: &str,
) -> Result<f64, PipelineError> {
    let value = match raw {
        None => return Ok(0.0),
        Some(RawPrice::Text(s)) if s.is_empty() => return Ok(0.0),
        Some(RawPrice::Text(s)) => s.parse::<f64>().map_err(|e| PipelineError::Price {
            context: context.to_string(),
            reason: format!("'{s}': {e}"),
        })?,
        Some(RawPrice::Number(n)) => *n,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(PipelineError::Price {
            context: context.to_string(),
            reason: format!("out of range: {value}"),
        });
    }
    Ok(value)
}

/// One-line human-readable sale summary for the run log:
/// `"{name} @ {price} {story}, originally {orig} at {merchant}"`.
pub(crate) fn sale_summary(name: &str, detail: &ItemDetail) -> String {
    let price = detail
        .current_price
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    let story = detail.sale_story.as_deref().unwrap_or_default();

    let mut summary = format!("{name} @ {price} {story}");
    if let Some(orig) = &detail.original_price {
        summary.push_str(&format!(", originally {orig}"));
    }
    summary.push_str(&format!(
        " at {}",
        detail.merchant.as_deref().unwrap_or_default()
    ));
    summary
}
