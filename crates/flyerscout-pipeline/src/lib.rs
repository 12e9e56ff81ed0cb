//! Deal discovery pipeline.
//!
//! Takes a search term plus an optional merchant list, pulls candidate
//! listings from the catalog service (keyword search when no merchants are
//! given, flyer enumeration per merchant otherwise), enriches each match
//! with price and promotion text, ranks everything by ascending price, and
//! renders the result into a notification digest.

pub mod classify;
pub mod error;
pub mod matcher;
pub mod notify;
pub mod pipeline;
pub mod types;

mod enrich;

pub use classify::ZeroShotClient;
pub use error::PipelineError;
pub use matcher::{
    Classifier, ClassifierMatcher, MatchStrategy, SubstringMatcher, DEFAULT_CONFIDENCE_THRESHOLD,
};
pub use notify::{build_digest, digest_line, Notifier};
pub use pipeline::discover;
pub use types::MatchedItem;
