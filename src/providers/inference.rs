use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::providers::{Sentiment, SentimentLabel, SentimentScorer};

/// Default public inference endpoint
const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Client for a HuggingFace-style text-classification inference endpoint
#[derive(Debug)]
pub struct InferenceScorer {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication (empty for unauthenticated local servers)
    api_key: String,
    /// API endpoint URL (optional, defaults to the public inference API)
    endpoint: String,
    /// Model identifier appended to the endpoint path
    model: String,
    /// Maximum input size accepted before the request is even sent
    max_chars: usize,
}

/// Text-classification request body
#[derive(Debug, Serialize)]
pub struct ClassificationRequest {
    /// The text to classify
    pub inputs: String,
}

/// One candidate label with its score
#[derive(Debug, Deserialize)]
pub struct ClassificationCandidate {
    /// Label name, e.g. "POSITIVE" or "NEGATIVE"
    pub label: String,
    /// Confidence score in [0, 1]
    pub score: f64,
}

/// The endpoint returns one candidate list per input text
type ClassificationResponse = Vec<Vec<ClassificationCandidate>>;

impl InferenceScorer {
    /// Create a new inference client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        max_chars: usize,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            max_chars,
        }
    }

    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/models/{}", base.trim_end_matches('/'), self.model)
    }

    /// Pick the top-scored candidate out of a classification response
    fn top_candidate(candidates: &[ClassificationCandidate]) -> Option<&ClassificationCandidate> {
        candidates
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

#[async_trait]
impl SentimentScorer for InferenceScorer {
    async fn score(&self, text: &str) -> Result<Sentiment, ProviderError> {
        let chars = text.chars().count();
        if self.max_chars > 0 && chars > self.max_chars {
            return Err(ProviderError::InputTooLong {
                chars,
                max: self.max_chars,
            });
        }

        let request = ClassificationRequest {
            inputs: text.to_string(),
        };

        let mut builder = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .json(&request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Inference API error ({}): {}", status, error_text);
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(ProviderError::AuthenticationError(error_text));
            }
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let parsed: ClassificationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        let candidates = parsed
            .first()
            .ok_or_else(|| ProviderError::ParseError("Empty classification response".to_string()))?;
        let top = Self::top_candidate(candidates).ok_or_else(|| {
            ProviderError::ParseError("No candidate labels in response".to_string())
        })?;

        Ok(Sentiment::new(
            SentimentLabel::from_label(&top.label),
            top.score.clamp(0.0, 1.0),
        ))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.score("Hello").await?;
        Ok(())
    }
}
