//! Wire types for the flyer aggregation service.
//!
//! All types model the JSON structures the service actually returns. Fields
//! that may be absent on the wire carry `#[serde(default)]` so absence parses
//! as `None`/empty instead of failing the whole response — absent and empty
//! string are distinct states and both are preserved.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Envelope for the keyword search endpoint.
///
/// The search response carries a parallel `ecom_items` array of e-commerce
/// listings next to the flyer `items`. Only `items` feeds the pipeline;
/// `ecom_items` is parsed but deliberately excluded (see
/// [`crate::CatalogClient::search_items`]).
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<ItemListing>,
    #[serde(default)]
    pub ecom_items: Vec<ItemListing>,
}

/// Envelope for the region flyer-data endpoint.
#[derive(Debug, Deserialize)]
pub struct FlyerDataResponse {
    #[serde(default)]
    pub flyers: Vec<Flyer>,
}

/// An active promotional flyer published by one merchant.
#[derive(Debug, Clone, Deserialize)]
pub struct Flyer {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Absent on some region entries. An absent merchant never matches a
    /// merchant filter — it is not a wildcard.
    #[serde(default)]
    pub merchant: Option<String>,
}

/// A lightweight item reference from search or flyer enumeration, prior to
/// detail enrichment.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemListing {
    #[serde(deserialize_with = "opaque_id")]
    pub id: String,
    /// Listings without a name are never matches.
    #[serde(default)]
    pub name: Option<String>,
}

/// Full per-item detail with price and promotion text.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDetail {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub current_price: Option<RawPrice>,
    #[serde(default)]
    pub original_price: Option<RawPrice>,
    /// Free-text promotion description, e.g. `"2 for $6"`. May be empty.
    #[serde(default)]
    pub sale_story: Option<String>,
    #[serde(default)]
    pub merchant: Option<String>,
}

/// A price exactly as it appears on the wire.
///
/// Some endpoints encode prices as JSON numbers, others as strings — and the
/// string may be empty. Normalization to `f64` happens in the pipeline so
/// schema surprises fail loudly there instead of being swallowed at parse
/// time.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

impl fmt::Display for RawPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawPrice::Number(n) => write!(f, "{n}"),
            RawPrice::Text(s) => f.write_str(s),
        }
    }
}

/// Accepts an id encoded as either a JSON number or a string and keeps it
/// opaque. The service is inconsistent across endpoints.
fn opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(i64),
        Text(String),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Num(n) => n.to_string(),
        IdRepr::Text(s) => s,
    })
}
