use thiserror::Error;

/// Errors raised by the pairwise diff primitive
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// One of the inputs exceeds the configured size guard.
    #[error("text is too large to compare ({lines} lines, {bytes} bytes; limit is {max_lines} lines, {max_bytes} bytes)")]
    TooLarge {
        lines: usize,
        bytes: usize,
        max_lines: usize,
        max_bytes: usize,
    },
}
