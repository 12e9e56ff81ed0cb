//! Remote zero-shot classification client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::matcher::Classifier;

/// HTTP client for a zero-shot classification inference endpoint.
///
/// POSTs `{"inputs": text, "candidate_labels": [...]}` and expects the
/// transformers-style response of parallel `labels`/`scores` arrays ordered
/// by descending confidence.
pub struct ZeroShotClient {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
    candidate_labels: &'a [String],
}

#[derive(Deserialize)]
struct ClassifyResponse {
    labels: Vec<String>,
    scores: Vec<f32>,
}

impl ZeroShotClient {
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl Classifier for ZeroShotClient {
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<Vec<(String, f32)>, PipelineError> {
        let request = ClassifyRequest {
            inputs: text,
            candidate_labels: labels,
        };
        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Classify(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::Classify(format!(
                "classifier returned status {}",
                response.status()
            )));
        }

        let parsed: ClassifyResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Classify(format!("response parse error: {e}")))?;

        if parsed.labels.len() != parsed.scores.len() {
            return Err(PipelineError::Classify(format!(
                "classifier returned {} labels for {} scores",
                parsed.labels.len(),
                parsed.scores.len()
            )));
        }

        Ok(parsed.labels.into_iter().zip(parsed.scores).collect())
    }
}
