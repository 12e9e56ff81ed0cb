//! Typed HTTP client for the flyer aggregation service.
//!
//! Wraps the two public hosts (keyword search and flyer data) behind one
//! [`CatalogClient`] with typed response deserialization. Listings come back
//! raw and unvalidated; relevance filtering and price normalization live in
//! the pipeline crate.

pub mod client;
pub mod error;
pub mod types;

pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::{Flyer, ItemDetail, ItemListing, RawPrice};
