use thiserror::Error;

use crate::document::RangeId;
use buffer_diff::TextRange;

/// Errors raised by document edits and range lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    /// The range reaches past the end of the document.
    #[error("range {range} is out of bounds for a document of {len} chars")]
    OutOfBounds { range: TextRange, len: usize },

    /// The range ends before it starts.
    #[error("range {start}..{end} is inverted")]
    InvertedRange { start: usize, end: usize },

    /// The marker was released, invalidated, or belongs to another document.
    #[error("unknown or invalid range marker {0}")]
    UnknownRange(RangeId),
}
