use derive_more::Display;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open range of char offsets into one text snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Display)]
#[display(fmt = "{}..{}", start, end)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TextRange {
    /// The first char offset (inclusive)
    pub start: usize,

    /// The last char offset (exclusive)
    pub end: usize,
}

impl TextRange {
    /// Create a new range from start and end (exclusive)
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted text range {start}..{end}");
        Self { start, end }
    }

    /// Create an empty range at the given offset
    pub fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Create a range from a start and a length
    pub fn from_len(start: usize, len: usize) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// Convert to a standard Range
    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Get the number of chars covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if this range is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this range contains the given offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// The overlapping part of two ranges, if it is not empty
    pub fn intersection(&self, other: &TextRange) -> Option<TextRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then(|| TextRange { start, end })
    }

    /// Move both ends by a signed delta, saturating at zero
    pub fn shifted(&self, delta: isize) -> TextRange {
        TextRange {
            start: self.start.saturating_add_signed(delta),
            end: self.end.saturating_add_signed(delta),
        }
    }
}

impl From<Range<usize>> for TextRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<TextRange> for Range<usize> {
    fn from(range: TextRange) -> Self {
        range.to_range()
    }
}
