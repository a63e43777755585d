use std::sync::Arc;

use log::debug;

use crate::errors::ProviderError;
use crate::providers::{Sentiment, SentimentScorer};

// @module: Segment scoring adapter

/// Stateless adapter that turns segment text into signed sentiment values.
///
/// One value per segment, in segment order: a positive classification
/// contributes `+confidence`, any other label `-confidence`. Scorer
/// failures (for example input too long for the model) propagate unchanged
/// to the caller; nothing is retried or substituted, since fabricating a
/// score would corrupt the trajectory.
#[derive(Debug, Clone)]
pub struct SentimentStream {
    scorer: Arc<dyn SentimentScorer>,
}

impl SentimentStream {
    /// Create a stream over the given scorer
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    /// Score one segment, collapsing label and confidence into one signed value
    pub async fn score(&self, segment: &str) -> Result<f64, ProviderError> {
        let sentiment = self.scorer.score(segment).await?;
        let value = sentiment.signed_value();
        debug!(
            "Scored segment of {} chars: {:?} -> {:.4}",
            segment.chars().count(),
            sentiment.label,
            value
        );
        Ok(value)
    }

    /// The raw classification for one segment
    pub async fn classify(&self, segment: &str) -> Result<Sentiment, ProviderError> {
        self.scorer.score(segment).await
    }
}
