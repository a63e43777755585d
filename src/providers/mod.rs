/*!
 * Provider implementations for sentiment classification services.
 *
 * This module contains the two narrow contracts the trajectory pipeline
 * consumes — token counting and sentiment scoring — plus the clients that
 * satisfy them:
 * - `inference`: HTTP client for a text-classification inference endpoint
 * - `tokens`: token counter implementations
 * - `mock`: scripted scorers for testing
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Polarity label assigned by a sentiment classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    /// Positive polarity
    Positive,
    /// Negative polarity
    Negative,
}

impl SentimentLabel {
    /// Parse a classifier label string. Anything that is not recognizably
    /// positive is treated as negative.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("positive") {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// A single classification result: polarity plus model confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    /// Polarity of the scored text
    pub label: SentimentLabel,
    /// Model confidence in [0, 1]
    pub confidence: f64,
}

impl Sentiment {
    /// Create a sentiment value
    pub fn new(label: SentimentLabel, confidence: f64) -> Self {
        Self { label, confidence }
    }

    /// Collapse label and confidence into one signed value: positive
    /// contributes `+confidence`, any other label `-confidence`.
    pub fn signed_value(&self) -> f64 {
        match self.label {
            SentimentLabel::Positive => self.confidence,
            SentimentLabel::Negative => -self.confidence,
        }
    }
}

/// Common trait for all sentiment scoring providers
///
/// Implementations may reject inputs exceeding their maximum length; such
/// rejection surfaces as a `ProviderError`, never as a silent default score.
#[async_trait]
pub trait SentimentScorer: Send + Sync + Debug {
    /// Score a piece of text, returning its polarity and confidence
    async fn score(&self, text: &str) -> Result<Sentiment, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;
}

/// Token counting contract used by the segmenter.
///
/// `count` must be deterministic across calls within one run: segment
/// boundaries depend on per-line counts adding up the same way every time.
pub trait TokenCounter: Send + Sync {
    /// Number of content tokens in `text`, classifier sentinels excluded
    fn count(&self, text: &str) -> usize;
}

impl<T: TokenCounter + ?Sized> TokenCounter for &T {
    fn count(&self, text: &str) -> usize {
        (**self).count(text)
    }
}

impl<T: TokenCounter + ?Sized> TokenCounter for Box<T> {
    fn count(&self, text: &str) -> usize {
        (**self).count(text)
    }
}

pub mod inference;
pub mod mock;
pub mod tokens;
