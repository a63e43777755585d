/*!
 * Trajectory pipeline: segments in, smoothed sentiment curve out.
 *
 * This module family contains the analysis core of the application:
 *
 * - `rolling`: fixed-capacity window and rolling-average smoothing
 * - `stream`: scoring adapter mapping segments to signed sentiment values
 *
 * The entry point is [`build_trajectory`], a strictly sequential pull-based
 * pipeline: each segment is read, scored, and folded into the averager
 * before the next one is touched. Nothing but the final trajectory is ever
 * materialized.
 */

use std::io::BufRead;
use std::sync::Arc;

use log::{debug, info};

use crate::errors::TrajectoryError;
use crate::providers::{SentimentScorer, TokenCounter};
use crate::story_processor::{BoundaryMarkers, StorySegmenter};

pub mod rolling;
pub mod stream;

// Re-export main types for easier usage
pub use self::rolling::{RollingAverager, RollingWindow, rolling_average};
pub use self::stream::SentimentStream;

/// Tuning knobs for one trajectory run
#[derive(Debug, Clone)]
pub struct TrajectoryOptions {
    /// Token budget at which a segment is cut
    pub segment_length: usize,

    /// Number of sentiment values averaged per trajectory point
    pub window_length: usize,

    /// Number of values the window advances between points
    pub stride: usize,

    /// Story body delimiters
    pub markers: BoundaryMarkers,
}

impl TrajectoryOptions {
    /// Create options with the given core parameters and default markers
    pub fn new(segment_length: usize, window_length: usize, stride: usize) -> Self {
        Self {
            segment_length,
            window_length,
            stride,
            markers: BoundaryMarkers::default(),
        }
    }

    /// Replace the default boundary markers
    pub fn with_markers(mut self, markers: BoundaryMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Reject zero-valued parameters before any I/O happens
    pub fn validate(&self) -> Result<(), TrajectoryError> {
        if self.segment_length == 0 {
            return Err(TrajectoryError::InvalidSegmentLength(self.segment_length));
        }
        if self.window_length == 0 {
            return Err(TrajectoryError::InvalidWindowLength(self.window_length));
        }
        if self.stride == 0 {
            return Err(TrajectoryError::InvalidStride(self.stride));
        }
        Ok(())
    }
}

impl Default for TrajectoryOptions {
    fn default() -> Self {
        Self::new(50, 5, 1)
    }
}

/// Build the emotional trajectory of the story behind `reader`.
///
/// See [`build_trajectory_with_progress`]; this variant reports nothing.
pub async fn build_trajectory<R: BufRead>(
    reader: R,
    counter: &dyn TokenCounter,
    scorer: Arc<dyn SentimentScorer>,
    options: &TrajectoryOptions,
) -> Result<Vec<f64>, TrajectoryError> {
    build_trajectory_with_progress(reader, counter, scorer, options, |_| {}).await
}

/// Build the emotional trajectory, invoking `on_segment` with the running
/// segment count after each segment is scored.
///
/// The pipeline is single-pass: the document is read once, front to back,
/// with exactly one scorer call in flight at any time. A document without
/// the start marker yields an empty trajectory; scorer and read failures
/// abort the run with no partial result.
pub async fn build_trajectory_with_progress<R: BufRead>(
    reader: R,
    counter: &dyn TokenCounter,
    scorer: Arc<dyn SentimentScorer>,
    options: &TrajectoryOptions,
    on_segment: impl Fn(usize),
) -> Result<Vec<f64>, TrajectoryError> {
    options.validate()?;

    let segments = StorySegmenter::new(
        reader,
        counter,
        options.markers.clone(),
        options.segment_length,
    );
    let stream = SentimentStream::new(scorer);
    let mut averager = RollingAverager::new(options.window_length, options.stride)?;

    let mut trajectory = Vec::new();
    let mut segment_count = 0usize;

    for segment in segments {
        let segment = segment?;
        let value = stream.score(&segment).await?;
        segment_count += 1;
        on_segment(segment_count);

        if let Some(average) = averager.push(value) {
            trajectory.push(average);
        }
    }

    debug!(
        "Scored {} segments, {} full windows emitted",
        averager.consumed(),
        averager.emitted()
    );

    if let Some(tail) = averager.finish() {
        trajectory.push(tail);
    }

    info!(
        "Trajectory complete: {} segments -> {} points",
        segment_count,
        trajectory.len()
    );

    Ok(trajectory)
}
