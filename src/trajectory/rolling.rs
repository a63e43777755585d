/*!
 * Rolling-average smoothing of the sentiment sequence.
 *
 * The averager consumes signed sentiment values one at a time through a
 * fixed-capacity FIFO window and emits one mean per full window, advancing
 * by a configurable stride. Once the input is exhausted, a trailing
 * partial-window mean is emitted when the full windows alone undershoot the
 * expected count. With a stride above one, that tail may reuse values
 * already covered by the last full window; this matches the reference
 * smoothing behavior and is kept as is.
 */

use std::collections::VecDeque;

use log::debug;

use crate::errors::TrajectoryError;

/// Bounded FIFO buffer of the most recent sentiment values.
///
/// Contents are only ever handed out by value (`mean`, `snapshot`), never
/// by reference into the buffer.
#[derive(Debug)]
pub struct RollingWindow {
    buf: VecDeque<f64>,
    capacity: usize,
}

impl RollingWindow {
    /// Create a window holding at most `capacity` values
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value to the window
    pub fn push(&mut self, value: f64) {
        self.buf.push_back(value);
    }

    /// Remove up to `n` oldest values; never more than are present
    pub fn evict(&mut self, n: usize) {
        for _ in 0..n.min(self.buf.len()) {
            self.buf.pop_front();
        }
    }

    /// Number of values currently held
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when no values are held
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// True once the window holds `capacity` values
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Mean of the held values. Caller must ensure the window is non-empty.
    pub fn mean(&self) -> f64 {
        self.buf.iter().sum::<f64>() / self.buf.len() as f64
    }

    /// Owned copy of the current contents, oldest first
    pub fn snapshot(&self) -> Vec<f64> {
        self.buf.iter().copied().collect()
    }
}

/// Incremental rolling averager with a window length and an advance stride.
///
/// Feed values with [`push`](Self::push), which yields a smoothed value each
/// time the window fills, then call [`finish`](Self::finish) for the
/// partial-window tail once the input is exhausted.
#[derive(Debug)]
pub struct RollingAverager {
    window: RollingWindow,
    window_length: usize,
    stride: usize,
    consumed: usize,
    emitted: usize,
}

impl RollingAverager {
    /// Create an averager, rejecting zero window length or stride up front
    pub fn new(window_length: usize, stride: usize) -> Result<Self, TrajectoryError> {
        if window_length == 0 {
            return Err(TrajectoryError::InvalidWindowLength(window_length));
        }
        if stride == 0 {
            return Err(TrajectoryError::InvalidStride(stride));
        }
        Ok(Self {
            window: RollingWindow::new(window_length),
            window_length,
            stride,
            consumed: 0,
            emitted: 0,
        })
    }

    /// Consume one value; returns the next smoothed value when the window
    /// has just filled, advancing the window by `stride`.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        self.window.push(value);
        self.consumed += 1;

        if self.window.is_full() {
            let average = self.window.mean();
            self.window.evict(self.stride);
            self.emitted += 1;
            return Some(average);
        }
        None
    }

    /// Emit the trailing partial-window average, if one is owed.
    ///
    /// The expected number of windows for `n` consumed values is
    /// `(n - window_length) / stride + 1` in real arithmetic, clamped to at
    /// least one whenever any value was consumed (a non-empty input always
    /// yields at least one average). When the full windows emitted so far
    /// fall short of that, the remaining buffer is averaged as is.
    pub fn finish(self) -> Option<f64> {
        if self.window.is_empty() {
            return None;
        }
        let expected = (self.consumed as f64 - self.window_length as f64) / self.stride as f64
            + 1.0;
        let expected = expected.max(1.0);
        if (self.emitted as f64) < expected {
            let tail = self.window.snapshot();
            debug!("Averaging partial tail window of {} values", tail.len());
            return Some(tail.iter().sum::<f64>() / tail.len() as f64);
        }
        None
    }

    /// Number of values consumed so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Number of full-window averages emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

/// Smooth a full sequence into its rolling-average trajectory.
///
/// `values` is consumed exactly once, in order. `stride` defaults to one in
/// the reference behavior; callers pass it explicitly here.
pub fn rolling_average(
    values: impl IntoIterator<Item = f64>,
    window_length: usize,
    stride: usize,
) -> Result<Vec<f64>, TrajectoryError> {
    let mut averager = RollingAverager::new(window_length, stride)?;
    let mut averages = Vec::new();
    for value in values {
        if let Some(average) = averager.push(value) {
            averages.push(average);
        }
    }
    if let Some(tail) = averager.finish() {
        averages.push(tail);
    }
    Ok(averages)
}
