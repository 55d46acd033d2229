//! Configuration for pairwise diffs.
//!
//! `DiffConfig` chooses the algorithm, the token granularity and the size
//! guard that makes oversized inputs fail fast instead of running unbounded.

use similar::{Algorithm, TextDiff as SimilarTextDiff};
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::buffer_diff::BufferDiff;
use crate::error::DiffError;

/// Largest number of lines a single input may have.
pub const MAX_DIFF_LINES: usize = 64 * u16::MAX as usize;
// cap average line length to 128 for files with MAX_DIFF_LINES
pub const MAX_DIFF_BYTES: usize = MAX_DIFF_LINES * 128;

/// The unit a diff is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffGranularity {
    /// Whole lines including their terminator
    #[default]
    Line,

    /// Words and the whitespace runs between them
    Word,

    /// Single chars
    Char,
}

/// Options controlling how two texts are compared.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffConfig {
    /// Diff algorithm used by `similar`.
    pub algorithm: Algorithm,

    /// Token granularity.
    pub granularity: DiffGranularity,

    /// Deadline after which `similar` falls back to a coarser result.
    pub timeout: Option<Duration>,

    /// Inputs with more lines than this are refused.
    pub max_lines: usize,

    /// Inputs with more bytes than this are refused.
    pub max_bytes: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Myers,
            granularity: DiffGranularity::Line,
            timeout: Some(Duration::from_secs(5)),
            max_lines: MAX_DIFF_LINES,
            max_bytes: MAX_DIFF_BYTES,
        }
    }
}

impl DiffConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diff algorithm.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the token granularity.
    pub fn granularity(mut self, granularity: DiffGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set or clear the deadline.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of lines per input.
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set the maximum number of bytes per input.
    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Diff two texts with this configuration
    pub fn diff(&self, old_text: &str, new_text: &str) -> Result<BufferDiff, DiffError> {
        BufferDiff::with_config(old_text, new_text, self)
    }

    /// Refuse inputs that exceed the size guard
    pub(crate) fn check_size(&self, text: &str) -> Result<(), DiffError> {
        let bytes = text.len();
        let lines = text.lines().count();
        if bytes > self.max_bytes || lines > self.max_lines {
            return Err(DiffError::TooLarge {
                lines,
                bytes,
                max_lines: self.max_lines,
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }

    /// Run `similar` over the two texts
    pub(crate) fn text_diff<'a>(
        &self,
        old_text: &'a str,
        new_text: &'a str,
    ) -> SimilarTextDiff<'a, 'a, 'a, str> {
        let mut config = SimilarTextDiff::configure();
        config.algorithm(self.algorithm);
        if let Some(timeout) = self.timeout {
            config.timeout(timeout);
        }

        match self.granularity {
            DiffGranularity::Line => config.diff_lines(old_text, new_text),
            DiffGranularity::Word => config.diff_words(old_text, new_text),
            DiffGranularity::Char => config.diff_chars(old_text, new_text),
        }
    }
}
