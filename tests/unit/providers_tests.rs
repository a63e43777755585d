/*!
 * Tests for provider contracts, mocks and token counters
 */

use storyshape::providers::mock::MockScorer;
use storyshape::providers::tokens::{HeuristicTokenCounter, WhitespaceTokenCounter};
use storyshape::providers::{Sentiment, SentimentLabel, SentimentScorer, TokenCounter};

/// Test classifier label parsing, case-insensitive on "positive"
#[test]
fn test_sentiment_label_withClassifierStrings_shouldParse() {
    assert_eq!(SentimentLabel::from_label("POSITIVE"), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_label("positive"), SentimentLabel::Positive);
    assert_eq!(SentimentLabel::from_label("NEGATIVE"), SentimentLabel::Negative);
    // Anything not recognizably positive counts as negative
    assert_eq!(SentimentLabel::from_label("NEUTRAL"), SentimentLabel::Negative);
    assert_eq!(SentimentLabel::from_label(""), SentimentLabel::Negative);
}

/// Test the signed-value convention on both polarities
#[test]
fn test_sentiment_withBothLabels_shouldSignConfidence() {
    assert_eq!(Sentiment::new(SentimentLabel::Positive, 0.9).signed_value(), 0.9);
    assert_eq!(Sentiment::new(SentimentLabel::Negative, 0.7).signed_value(), -0.7);
}

/// Test that the working mock always scores positive and counts calls
#[tokio::test]
async fn test_mock_scorer_withWorkingBehavior_shouldScoreAndCount() {
    let scorer = MockScorer::working();
    for _ in 0..3 {
        let sentiment = scorer.score("text").await.unwrap();
        assert_eq!(sentiment.label, SentimentLabel::Positive);
        assert_eq!(sentiment.confidence, 0.9);
    }
    assert_eq!(scorer.calls(), 3);
}

/// Test that a scripted mock cycles once its script is exhausted
#[tokio::test]
async fn test_mock_scorer_withShortScript_shouldCycle() {
    let scorer = MockScorer::scripted(vec![
        Sentiment::new(SentimentLabel::Positive, 0.2),
        Sentiment::new(SentimentLabel::Negative, 0.4),
    ]);

    let first = scorer.score("a").await.unwrap();
    let second = scorer.score("b").await.unwrap();
    let third = scorer.score("c").await.unwrap();
    assert_eq!(third, first);
    assert_ne!(second, first);
}

/// Test that the failing mock also fails its connection test
#[tokio::test]
async fn test_mock_scorer_withFailingBehavior_shouldFailConnectionTest() {
    let scorer = MockScorer::failing();
    assert!(scorer.test_connection().await.is_err());
    assert!(MockScorer::working().test_connection().await.is_ok());
}

/// Test whitespace token counting
#[test]
fn test_whitespace_counter_withWordsAndNewlines_shouldCountWords() {
    let counter = WhitespaceTokenCounter;
    assert_eq!(counter.count("The quick brown fox\n"), 4);
    assert_eq!(counter.count("word\n"), 1);
    assert_eq!(counter.count("\n"), 0);
    assert_eq!(counter.count(""), 0);
}

/// Test the ~4 chars/token heuristic rounds up
#[test]
fn test_heuristic_counter_withVariousLengths_shouldRoundUp() {
    let counter = HeuristicTokenCounter;
    assert_eq!(counter.count(""), 0);
    assert_eq!(counter.count("abcd"), 1);
    assert_eq!(counter.count("abcde"), 2);
    assert_eq!(counter.count("a"), 1);
}

/// Test counters stay deterministic across repeated calls
#[test]
fn test_counters_withRepeatedCalls_shouldBeDeterministic() {
    let line = "Hwaet! We Gardena in geardagum\n";
    let whitespace = WhitespaceTokenCounter;
    let heuristic = HeuristicTokenCounter;
    for _ in 0..5 {
        assert_eq!(whitespace.count(line), whitespace.count(line));
        assert_eq!(heuristic.count(line), heuristic.count(line));
    }
}
