//! Relevance matching strategies.
//!
//! One capability seam, two interchangeable implementations: literal
//! substring containment (the default) and classifier-backed matching. The
//! rest of the pipeline never knows which one is active. In keyword-search
//! mode the remote search endpoint already did the matching, so no strategy
//! is applied there at all.

use async_trait::async_trait;

use crate::error::PipelineError;

/// Minimum classifier confidence for a candidate to count as a match.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.6;

/// Decides whether a candidate listing name is relevant to a search term.
#[async_trait]
pub trait MatchStrategy: Send + Sync {
    /// # Errors
    ///
    /// Returns [`PipelineError::Classify`] when a backing classifier fails;
    /// the literal strategy is infallible.
    async fn is_match(&self, candidate_name: &str, term: &str) -> Result<bool, PipelineError>;
}

/// Ranks a text against candidate labels, best first, confidence in [0, 1].
#[async_trait]
pub trait Classifier: Send + Sync {
    /// # Errors
    ///
    /// Returns [`PipelineError::Classify`] on transport failure or a
    /// malformed ranking.
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<(String, f32)>, PipelineError>;
}

/// Case-insensitive literal substring containment.
pub struct SubstringMatcher;

#[async_trait]
impl MatchStrategy for SubstringMatcher {
    async fn is_match(&self, candidate_name: &str, term: &str) -> Result<bool, PipelineError> {
        Ok(candidate_name
            .to_lowercase()
            .contains(&term.to_lowercase()))
    }
}

/// Classifier-backed matching.
///
/// Classifies the candidate name against two labels, the term and its
/// negation (`"not {term}"`). The candidate matches iff the term ranks
/// first with confidence at or above the threshold.
pub struct ClassifierMatcher<C> {
    classifier: C,
    threshold: f32,
}

impl<C: Classifier> ClassifierMatcher<C> {
    pub fn new(classifier: C) -> Self {
        Self::with_threshold(classifier, DEFAULT_CONFIDENCE_THRESHOLD)
    }

    pub fn with_threshold(classifier: C, threshold: f32) -> Self {
        Self {
            classifier,
            threshold,
        }
    }
}

#[async_trait]
impl<C: Classifier> MatchStrategy for ClassifierMatcher<C> {
    async fn is_match(&self, candidate_name: &str, term: &str) -> Result<bool, PipelineError> {
        let labels = vec![term.to_string(), format!("not {term}")];
        let ranked = self.classifier.classify(candidate_name, &labels).await?;

        let matched = ranked
            .first()
            .is_some_and(|(label, score)| label == term && *score >= self.threshold);
        if matched {
            tracing::debug!(candidate = candidate_name, term, "classifier match");
        }
        Ok(matched)
    }
}
