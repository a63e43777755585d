use std::io::{self, BufRead};

use log::debug;

use crate::providers::TokenCounter;

// @module: Story reading and token-budget segmentation

/// Start-of-body marker used by Project Gutenberg e-books
pub const GUTENBERG_START_MARKER: &str = "*** START OF THIS PROJECT GUTENBERG EBOOK";

/// End-of-body marker used by Project Gutenberg e-books
pub const GUTENBERG_END_MARKER: &str = "*** END OF THIS PROJECT GUTENBERG EBOOK";

/// Literal prefixes delimiting the story body inside a larger document.
///
/// Matching is case-sensitive "line starts with marker", checked on raw
/// lines with no trimming. The marker lines themselves are never part of
/// any segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMarkers {
    /// Prefix of the line that opens the story body (line itself discarded)
    pub start: String,

    /// Prefix of the line that closes the story body (line itself discarded)
    pub end: String,
}

impl BoundaryMarkers {
    /// Create markers from caller-supplied prefixes
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for BoundaryMarkers {
    fn default() -> Self {
        Self::new(GUTENBERG_START_MARKER, GUTENBERG_END_MARKER)
    }
}

/// Lazy token-budget segmenter over a story document.
///
/// Reads the document one line at a time, skips everything up to and
/// including the first start-marker line, then accumulates lines into a
/// segment until the running token count reaches `segment_length`. A line
/// starting with the end marker stops the scan; the remaining buffer, if
/// any, is emitted as one final under-threshold segment. Segments partition
/// the story body in document order with no gaps or overlaps, and each
/// segment's text preserves the newlines of its constituent lines.
///
/// The iterator is single-pass and non-restartable: consuming it twice
/// requires re-reading the document from the source. Dropping it drops the
/// underlying reader, releasing the input on every exit path.
pub struct StorySegmenter<R: BufRead, C: TokenCounter> {
    reader: R,
    counter: C,
    markers: BoundaryMarkers,
    segment_length: usize,
    started: bool,
    finished: bool,
}

impl<R: BufRead, C: TokenCounter> StorySegmenter<R, C> {
    /// Create a segmenter over `reader` with the given token budget.
    ///
    /// `segment_length` is the token threshold at which a segment is cut;
    /// zero is rejected upstream by configuration validation.
    pub fn new(reader: R, counter: C, markers: BoundaryMarkers, segment_length: usize) -> Self {
        Self {
            reader,
            counter,
            markers,
            segment_length,
            started: false,
            finished: false,
        }
    }

    /// Read one raw line, newline included. None at end of input.
    fn read_raw_line(&mut self) -> Option<io::Result<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(Ok(line)),
            Err(e) => Some(Err(e)),
        }
    }

    /// Discard lines through the first start-marker line. Returns false if
    /// the input ended (or failed) before any marker was seen.
    fn skip_to_story_start(&mut self) -> Option<io::Result<()>> {
        loop {
            match self.read_raw_line() {
                None => return None,
                Some(Err(e)) => return Some(Err(e)),
                Some(Ok(line)) => {
                    if line.starts_with(&self.markers.start) {
                        return Some(Ok(()));
                    }
                }
            }
        }
    }
}

impl<R: BufRead, C: TokenCounter> Iterator for StorySegmenter<R, C> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            match self.skip_to_story_start() {
                // No start marker in the whole document: empty story body
                None => {
                    self.finished = true;
                    debug!("No start marker found, story body is empty");
                    return None;
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                Some(Ok(())) => self.started = true,
            }
        }

        let mut segment = String::new();
        let mut segment_tokens = 0usize;

        loop {
            match self.read_raw_line() {
                None => {
                    // Document exhausted without an end marker: the trailing
                    // buffer is still story body
                    self.finished = true;
                    return (!segment.is_empty()).then_some(Ok(segment));
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                Some(Ok(line)) => {
                    if line.starts_with(&self.markers.end) {
                        // The marker line and everything after it is discarded
                        self.finished = true;
                        return (!segment.is_empty()).then_some(Ok(segment));
                    }

                    segment_tokens += self.counter.count(&line);
                    segment.push_str(&line);
                    if segment_tokens >= self.segment_length {
                        return Some(Ok(segment));
                    }
                }
            }
        }
    }
}
