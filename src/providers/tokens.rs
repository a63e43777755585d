/*!
 * Token counter implementations.
 *
 * The segmenter only ever sees the `TokenCounter` trait; which counting rule
 * backs it is a configuration concern. Three rules are provided:
 * - `PretrainedTokenCounter`: a HuggingFace tokenizer loaded from file,
 *   counting exactly what the classifier will see
 * - `WhitespaceTokenCounter`: whitespace-delimited words
 * - `HeuristicTokenCounter`: a cheap ~4-chars-per-token approximation
 */

use anyhow::{Context, Result, anyhow};
use log::warn;
use std::path::Path;
use tokenizers::Tokenizer;

use crate::providers::TokenCounter;

/// Characters per token assumed by the heuristic counter
const HEURISTIC_CHARS_PER_TOKEN: usize = 4;

/// Token counter backed by a pretrained HuggingFace tokenizer file.
///
/// Counts the encoded ids minus the two sentinel tokens the classifier's
/// tokenizer wraps around every input, so per-line counts stay additive.
pub struct PretrainedTokenCounter {
    tokenizer: Tokenizer,
}

impl PretrainedTokenCounter {
    /// Load a tokenizer from a `tokenizer.json` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path)
            .map_err(|e| anyhow!("{}", e))
            .context(format!("Failed to load tokenizer from {:?}", path))?;
        Ok(Self { tokenizer })
    }
}

impl TokenCounter for PretrainedTokenCounter {
    fn count(&self, text: &str) -> usize {
        match self.tokenizer.encode(text, true) {
            // The encoding carries a leading and a trailing sentinel token
            Ok(encoding) => encoding.get_ids().len().saturating_sub(2),
            Err(e) => {
                warn!("Tokenizer failed on line, counting zero tokens: {}", e);
                0
            }
        }
    }
}

impl std::fmt::Debug for PretrainedTokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PretrainedTokenCounter").finish_non_exhaustive()
    }
}

/// Token counter that treats every whitespace-delimited word as one token
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceTokenCounter;

impl TokenCounter for WhitespaceTokenCounter {
    fn count(&self, text: &str) -> usize {
        text.split_whitespace().count()
    }
}

/// Approximate token counter for runs without a tokenizer file
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicTokenCounter;

impl TokenCounter for HeuristicTokenCounter {
    fn count(&self, text: &str) -> usize {
        // heuristic ~4 chars/token
        (text.chars().count() + HEURISTIC_CHARS_PER_TOKEN - 1) / HEURISTIC_CHARS_PER_TOKEN
    }
}
