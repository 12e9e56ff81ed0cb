//! Digest rendering and notification delivery.

use crate::error::PipelineError;
use crate::types::MatchedItem;

/// Renders one digest line, or `None` for an uninformative item.
///
/// Items with a real price show the price; sentinel-priced items fall back
/// to their promotion text. An item with neither (`price == 0.0` and an
/// empty sale story) has nothing to show and is dropped — the only filter
/// applied at this stage.
#[must_use]
pub fn digest_line(item: &MatchedItem) -> Option<String> {
    if item.price != 0.0 {
        Some(format!(
            "${:.2} for [{}] at {}",
            item.price, item.name, item.merchant
        ))
    } else if item.sale_story.is_empty() {
        None
    } else {
        Some(format!(
            "{} for [{}] at {}",
            item.sale_story, item.name, item.merchant
        ))
    }
}

/// Builds the full digest text, or `None` when no lines survive the filter
/// (in which case nothing should be sent).
#[must_use]
pub fn build_digest(term: &str, items: &[MatchedItem]) -> Option<String> {
    let lines: Vec<String> = items.iter().filter_map(digest_line).collect();
    if lines.is_empty() {
        return None;
    }
    Some(format!(
        "🔥 {term} found on sale today:\n{}",
        lines.join("\n")
    ))
}

/// Posts digest text to a notification channel.
pub struct Notifier {
    client: reqwest::Client,
    url: String,
}

impl Notifier {
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }

    /// Sends the digest as the POST body. Not retried.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Http`] on transport failure and
    /// [`PipelineError::Delivery`] with the status and body when the channel
    /// responds with a non-success status.
    pub async fn send(&self, text: &str) -> Result<(), PipelineError> {
        let response = self.client.post(&self.url).body(text.to_string()).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Delivery {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(bytes = text.len(), "notification dispatched");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, price: f64, sale_story: &str, merchant: &str) -> MatchedItem {
        MatchedItem {
            name: name.to_string(),
            price,
            sale_story: sale_story.to_string(),
            merchant: merchant.to_string(),
        }
    }

    #[test]
    fn priced_item_renders_dollar_line() {
        let line = digest_line(&item("Whole Wheat Bread", 3.49, "2 for $6", "Zehrs"));
        assert_eq!(
            line.as_deref(),
            Some("$3.49 for [Whole Wheat Bread] at Zehrs")
        );
    }

    #[test]
    fn sentinel_price_falls_back_to_sale_story() {
        let line = digest_line(&item("Bagels", 0.0, "Buy 1 Get 1", "FreshCo"));
        assert_eq!(line.as_deref(), Some("Buy 1 Get 1 for [Bagels] at FreshCo"));
    }

    #[test]
    fn sentinel_price_with_empty_story_is_dropped() {
        assert!(digest_line(&item("Bagels", 0.0, "", "FreshCo")).is_none());
    }

    #[test]
    fn digest_joins_lines_under_header() {
        let items = vec![
            item("Bread", 3.49, "", "Zehrs"),
            item("Bagels", 0.0, "Buy 1 Get 1", "FreshCo"),
        ];
        let digest = build_digest("bread", &items).unwrap();
        assert_eq!(
            digest,
            "🔥 bread found on sale today:\n$3.49 for [Bread] at Zehrs\nBuy 1 Get 1 for [Bagels] at FreshCo"
        );
    }

    #[test]
    fn digest_is_none_when_every_item_is_uninformative() {
        let items = vec![item("Bagels", 0.0, "", "FreshCo")];
        assert!(build_digest("bagels", &items).is_none());
    }

    #[test]
    fn digest_is_none_for_empty_input() {
        assert!(build_digest("bread", &[]).is_none());
    }
}
