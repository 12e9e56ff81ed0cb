//! Discovery orchestration: query, match, enrich, aggregate, rank.

use flyerscout_catalog::{CatalogClient, ItemListing};

use crate::enrich::enrich_listing;
use crate::error::PipelineError;
use crate::matcher::MatchStrategy;
use crate::types::MatchedItem;

/// Discovers promotional items matching `term`.
///
/// Empty `stores` selects keyword-search mode across the whole region: the
/// remote search endpoint does the matching and `matcher` is not consulted.
/// Non-empty `stores` selects merchant-scoped mode: every listed merchant's
/// active flyers are enumerated and each listing is run through `matcher`.
///
/// Results from all stores are concatenated without deduplication —
/// identical items appearing in several merchants' flyers are all kept —
/// then stably sorted by ascending price, so ties keep detail-fetch order.
/// Every network call is issued sequentially, one at a time.
///
/// Zero matches is a valid empty result, not an error.
///
/// # Errors
///
/// Any fetch, parse, or classification failure aborts the whole call;
/// there is no partial-result salvage across merchants.
pub async fn discover<M>(
    client: &CatalogClient,
    matcher: &M,
    term: &str,
    stores: &[String],
) -> Result<Vec<MatchedItem>, PipelineError>
where
    M: MatchStrategy + ?Sized,
{
    let mut matched = if stores.is_empty() {
        discover_by_keyword(client, term).await?
    } else {
        let mut combined = Vec::new();
        for store in stores {
            let items = discover_for_store(client, matcher, term, store).await?;
            combined.extend(items);
        }
        combined
    };

    matched.sort_by(|a, b| a.price.total_cmp(&b.price));

    tracing::info!(term, count = matched.len(), "discovery finished");
    Ok(matched)
}

/// Keyword mode: the search endpoint already filtered for relevance, so
/// every named listing goes straight to enrichment.
async fn discover_by_keyword(
    client: &CatalogClient,
    term: &str,
) -> Result<Vec<MatchedItem>, PipelineError> {
    let listings = client.search_items(term).await?;
    tracing::debug!(term, candidates = listings.len(), "keyword search returned");

    let mut matched = Vec::new();
    for listing in &listings {
        if listing_name(listing).is_none() {
            continue;
        }
        if let Some(item) = enrich_listing(client, &listing.id).await? {
            matched.push(item);
        }
    }
    Ok(matched)
}

/// Merchant mode: enumerate the store's flyer items and run each named
/// listing through the matching strategy before enriching.
async fn discover_for_store<M>(
    client: &CatalogClient,
    matcher: &M,
    term: &str,
    store: &str,
) -> Result<Vec<MatchedItem>, PipelineError>
where
    M: MatchStrategy + ?Sized,
{
    let listings = client.items_for_merchant(store).await?;

    let mut matched = Vec::new();
    for listing in &listings {
        let Some(name) = listing_name(listing) else {
            continue;
        };
        if !matcher.is_match(name, term).await? {
            continue;
        }
        if let Some(item) = enrich_listing(client, &listing.id).await? {
            matched.push(item);
        }
    }

    tracing::info!(
        store,
        term,
        candidates = listings.len(),
        matches = matched.len(),
        "scanned store flyers"
    );
    Ok(matched)
}

/// Listings without a present, non-empty name are never matches.
fn listing_name(listing: &ItemListing) -> Option<&str> {
    listing.name.as_deref().filter(|n| !n.is_empty())
}
