//! HTTP client for the flyer aggregation service.
//!
//! The service is split across two hosts: a CDN gateway for keyword search
//! and a data host for region flyers, flyer items, and item detail. Every
//! method is one blocking round-trip with no retry; transport and status
//! failures surface as [`CatalogError::Http`], malformed bodies as
//! [`CatalogError::Deserialize`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::types::{Flyer, FlyerDataResponse, ItemDetail, ItemListing, SearchResponse};

const DEFAULT_SEARCH_BASE_URL: &str = "https://cdn-gateflipp.flippback.com";
const DEFAULT_DATA_BASE_URL: &str = "https://dam.flippenterprise.net";

/// Locale the search endpoint expects.
const SEARCH_LOCALE: &str = "en-ca";
/// Locale the flyer-data endpoints expect.
const DATA_LOCALE: &str = "en";

/// Client for the flyer aggregation service.
///
/// Holds the HTTP client, region parameters, and both base URLs. Use
/// [`CatalogClient::new`] for production or [`CatalogClient::with_base_urls`]
/// to point at a mock server in tests.
pub struct CatalogClient {
    client: Client,
    search_base: Url,
    data_base: Url,
    postal_code: String,
    sid: String,
}

impl CatalogClient {
    /// Creates a new client pointed at the production hosts.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        postal_code: &str,
        sid: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, CatalogError> {
        Self::with_base_urls(
            postal_code,
            sid,
            timeout_secs,
            user_agent,
            DEFAULT_SEARCH_BASE_URL,
            DEFAULT_DATA_BASE_URL,
        )
    }

    /// Creates a new client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`CatalogError::InvalidBaseUrl`] if either
    /// base URL does not parse.
    pub fn with_base_urls(
        postal_code: &str,
        sid: &str,
        timeout_secs: u64,
        user_agent: &str,
        search_base_url: &str,
        data_base_url: &str,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            search_base: parse_base_url(search_base_url)?,
            data_base: parse_base_url(data_base_url)?,
            postal_code: postal_code.to_owned(),
            sid: sid.to_owned(),
        })
    }

    /// Free-text keyword search across all merchants visible for the region.
    ///
    /// Returns the flyer `items` array only. The parallel `ecom_items` array
    /// of e-commerce listings is excluded from results; that exclusion is
    /// policy, not an oversight.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] if the body is not valid JSON or does
    ///   not match the expected shape.
    pub async fn search_items(&self, term: &str) -> Result<Vec<ItemListing>, CatalogError> {
        // The search endpoint wants an empty sid, unlike the data host.
        let url = build_url(
            &self.search_base,
            &["bf", "flipp", "items", "search"],
            &[
                ("locale", SEARCH_LOCALE),
                ("postal_code", &self.postal_code),
                ("sid", ""),
                ("q", term),
            ],
        );
        let body = self.request_json(&url).await?;

        let parsed: SearchResponse =
            serde_json::from_value(body).map_err(|e| CatalogError::Deserialize {
                context: format!("items/search(q={term})"),
                source: e,
            })?;

        if !parsed.ecom_items.is_empty() {
            tracing::debug!(
                count = parsed.ecom_items.len(),
                "ignoring e-commerce listings from search response"
            );
        }

        Ok(parsed.items)
    }

    /// Fetches the full region flyer set and filters client-side for the
    /// given merchant.
    ///
    /// Merchant comparison is case-insensitive exact equality; a flyer with
    /// an absent merchant field never matches.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] if the body is not valid JSON or does
    ///   not match the expected shape.
    pub async fn find_flyers_by_merchant(
        &self,
        merchant: &str,
    ) -> Result<Vec<Flyer>, CatalogError> {
        let url = build_url(
            &self.data_base,
            &["api", "flipp", "data"],
            &[
                ("locale", DATA_LOCALE),
                ("postal_code", &self.postal_code),
                ("sid", &self.sid),
            ],
        );
        let body = self.request_json(&url).await?;

        let parsed: FlyerDataResponse =
            serde_json::from_value(body).map_err(|e| CatalogError::Deserialize {
                context: "flipp/data".to_string(),
                source: e,
            })?;

        let wanted = merchant.to_lowercase();
        let matched: Vec<Flyer> = parsed
            .flyers
            .into_iter()
            .filter(|f| {
                f.merchant
                    .as_ref()
                    .is_some_and(|m| m.to_lowercase() == wanted)
            })
            .collect();

        tracing::debug!(merchant, count = matched.len(), "matched region flyers");
        Ok(matched)
    }

    /// Fetches the complete item set for one flyer.
    ///
    /// The endpoint returns the full set in one response; there is no
    /// pagination.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] if the body is not valid JSON or does
    ///   not match the expected shape.
    pub async fn flyer_items(&self, flyer_id: &str) -> Result<Vec<ItemListing>, CatalogError> {
        let url = build_url(
            &self.data_base,
            &["api", "flipp", "flyers", flyer_id, "flyer_items"],
            &[("locale", DATA_LOCALE)],
        );
        let body = self.request_json(&url).await?;

        serde_json::from_value(body).map_err(|e| CatalogError::Deserialize {
            context: format!("flyers/{flyer_id}/flyer_items"),
            source: e,
        })
    }

    /// Fetches full detail for one item id.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Http`] on network failure or non-2xx HTTP status.
    /// - [`CatalogError::Deserialize`] if the body is not valid JSON or does
    ///   not match the expected shape.
    pub async fn item_detail(&self, item_id: &str) -> Result<ItemDetail, CatalogError> {
        let url = build_url(
            &self.data_base,
            &["api", "flipp", "flyer_items", item_id],
            &[
                ("locale", DATA_LOCALE),
                ("sid", &self.sid),
                ("postal_code", &self.postal_code),
            ],
        );
        let body = self.request_json(&url).await?;

        serde_json::from_value(body).map_err(|e| CatalogError::Deserialize {
            context: format!("flyer_items/{item_id}"),
            source: e,
        })
    }

    /// Enumerates every item across all of a merchant's active flyers.
    ///
    /// Chains [`Self::find_flyers_by_merchant`] and [`Self::flyer_items`],
    /// one request per flyer, and concatenates the results.
    ///
    /// # Errors
    ///
    /// Propagates the first [`CatalogError`] from either step; a failure on
    /// any flyer aborts the whole enumeration.
    pub async fn items_for_merchant(
        &self,
        merchant: &str,
    ) -> Result<Vec<ItemListing>, CatalogError> {
        let flyers = self.find_flyers_by_merchant(merchant).await?;

        let mut items = Vec::new();
        for flyer in &flyers {
            let flyer_items = self.flyer_items(&flyer.id).await?;
            items.extend(flyer_items);
        }

        tracing::info!(
            merchant,
            flyers = flyers.len(),
            items = items.len(),
            "enumerated flyer items for merchant"
        );
        Ok(items)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] on network failure or a non-2xx status.
    /// Returns [`CatalogError::Deserialize`] if the body is not valid JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, CatalogError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| CatalogError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Parses and normalises a base URL, trimming any trailing slash so path
/// segments append cleanly.
fn parse_base_url(raw: &str) -> Result<Url, CatalogError> {
    Url::parse(raw.trim_end_matches('/')).map_err(|e| CatalogError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

/// Builds a request URL from a base, path segments, and query parameters,
/// percent-encoding both via the `url` crate.
fn build_url(base: &Url, segments: &[&str], query: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in query {
            pairs.append_pair(k, v);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_segments_and_query() {
        let base = parse_base_url("https://dam.flippenterprise.net").unwrap();
        let url = build_url(
            &base,
            &["api", "flipp", "flyers", "123", "flyer_items"],
            &[("locale", "en")],
        );
        assert_eq!(
            url.as_str(),
            "https://dam.flippenterprise.net/api/flipp/flyers/123/flyer_items?locale=en"
        );
    }

    #[test]
    fn build_url_tolerates_trailing_slash_on_base() {
        let base = parse_base_url("https://dam.flippenterprise.net/").unwrap();
        let url = build_url(&base, &["api", "flipp", "data"], &[("locale", "en")]);
        assert_eq!(
            url.as_str(),
            "https://dam.flippenterprise.net/api/flipp/data?locale=en"
        );
    }

    #[test]
    fn build_url_encodes_query_values() {
        let base = parse_base_url("https://cdn-gateflipp.flippback.com").unwrap();
        let url = build_url(
            &base,
            &["bf", "flipp", "items", "search"],
            &[("q", "peanut butter & jam")],
        );
        assert!(
            url.as_str().contains("peanut+butter+%26+jam")
                || url.as_str().contains("peanut%20butter%20%26%20jam"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        let result = parse_base_url("not a url");
        assert!(matches!(result, Err(CatalogError::InvalidBaseUrl { .. })));
    }
}
