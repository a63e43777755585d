/*!
 * Mock scorer implementations for testing.
 *
 * This module provides mock scorers that simulate different behaviors:
 * - `MockScorer::working()` - always succeeds with a fixed positive score
 * - `MockScorer::scripted(...)` - replays a fixed sequence of sentiments
 * - `MockScorer::failing()` - always fails with an error
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::{Sentiment, SentimentLabel, SentimentScorer};

/// Behavior mode for the mock scorer
#[derive(Debug, Clone)]
pub enum MockScorerBehavior {
    /// Always return the same sentiment
    Fixed(Sentiment),
    /// Replay a sequence of sentiments, cycling once exhausted
    Scripted(Vec<Sentiment>),
    /// Always fail with a request error
    Failing,
    /// Reject every input as too long
    RejectingLength {
        /// Limit reported in the error
        max: usize,
    },
}

/// Mock scorer for exercising the pipeline without a live endpoint
#[derive(Debug)]
pub struct MockScorer {
    /// Behavior mode
    behavior: MockScorerBehavior,
    /// Number of score calls made so far
    call_count: Arc<AtomicUsize>,
}

impl MockScorer {
    /// Create a new mock scorer with the specified behavior
    pub fn new(behavior: MockScorerBehavior) -> Self {
        Self {
            behavior,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock that always returns positive 0.9
    pub fn working() -> Self {
        Self::new(MockScorerBehavior::Fixed(Sentiment::new(
            SentimentLabel::Positive,
            0.9,
        )))
    }

    /// Create a mock that replays the given sentiments in order
    pub fn scripted(script: Vec<Sentiment>) -> Self {
        Self::new(MockScorerBehavior::Scripted(script))
    }

    /// Create a failing mock that always errors
    pub fn failing() -> Self {
        Self::new(MockScorerBehavior::Failing)
    }

    /// Create a mock that rejects every input as oversized
    pub fn rejecting_length(max: usize) -> Self {
        Self::new(MockScorerBehavior::RejectingLength { max })
    }

    /// Number of score calls made against this mock
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentScorer for MockScorer {
    async fn score(&self, text: &str) -> Result<Sentiment, ProviderError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockScorerBehavior::Fixed(sentiment) => Ok(*sentiment),
            MockScorerBehavior::Scripted(script) => {
                if script.is_empty() {
                    return Err(ProviderError::RequestFailed(
                        "Scripted mock has no sentiments".to_string(),
                    ));
                }
                Ok(script[call % script.len()])
            }
            MockScorerBehavior::Failing => Err(ProviderError::RequestFailed(
                "Mock scorer configured to fail".to_string(),
            )),
            MockScorerBehavior::RejectingLength { max } => Err(ProviderError::InputTooLong {
                chars: text.chars().count(),
                max: *max,
            }),
        }
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        match self.behavior {
            MockScorerBehavior::Failing => Err(ProviderError::RequestFailed(
                "Mock scorer configured to fail".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
