use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use buffer_diff::TextRange;
use derive_more::Display;
use log::trace;
use ropey::Rope;

use crate::error::DocumentError;
use crate::marker::{adjust_range, Edit};

static NEXT_DOCUMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "doc#{}", _0)]
pub struct DocumentId(u64);

/// Handle to a live range marker inside one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "{}:{}", document, index)]
pub struct RangeId {
    document: DocumentId,
    index: u64,
}

impl RangeId {
    /// The document this marker lives in
    pub fn document(&self) -> DocumentId {
        self.document
    }
}

/// A mutable text with live range markers
#[derive(Debug)]
pub struct Document {
    /// Identity used to check which document a marker belongs to
    id: DocumentId,

    /// The current text
    text: Rope,

    /// Live markers by index
    markers: BTreeMap<u64, TextRange>,

    /// Next marker index, never reused
    next_marker: u64,

    /// Markers invalidated since the queue was last drained
    invalidated: Vec<RangeId>,

    /// Bumped on every edit
    modification_stamp: u64,
}

impl Document {
    /// Create a new document holding the given text
    pub fn new(text: &str) -> Self {
        Self {
            id: DocumentId(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed)),
            text: Rope::from_str(text),
            markers: BTreeMap::new(),
            next_marker: 0,
            invalidated: Vec::new(),
            modification_stamp: 0,
        }
    }

    /// Get the document identity
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Get the text
    pub fn text(&self) -> &Rope {
        &self.text
    }

    /// Get the text as a string
    pub fn contents(&self) -> String {
        self.text.to_string()
    }

    /// Get the number of chars
    pub fn len_chars(&self) -> usize {
        self.text.len_chars()
    }

    /// Get the number of edits applied so far
    pub fn modification_stamp(&self) -> u64 {
        self.modification_stamp
    }

    /// Copy out the text covered by a range
    pub fn slice(&self, range: TextRange) -> Result<String, DocumentError> {
        self.check_range(range)?;
        Ok(self.text.slice(range.to_range()).to_string())
    }

    /// Replace the chars in `range` with `text`
    pub fn replace(&mut self, range: TextRange, text: &str) -> Result<(), DocumentError> {
        self.replace_impl(range, text, None)
    }

    /// Insert text at a char offset
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), DocumentError> {
        self.replace_impl(TextRange::empty(offset), text, None)
    }

    /// Delete the chars in `range`
    pub fn delete(&mut self, range: TextRange) -> Result<(), DocumentError> {
        self.replace_impl(range, "", None)
    }

    /// Start tracking a range
    pub fn create_range(&mut self, range: TextRange) -> Result<RangeId, DocumentError> {
        self.check_range(range)?;
        let index = self.next_marker;
        self.next_marker += 1;
        self.markers.insert(index, range);
        Ok(RangeId {
            document: self.id,
            index,
        })
    }

    /// Get the current offsets of a marker, or `None` once it is invalid or released
    pub fn range(&self, id: RangeId) -> Option<TextRange> {
        if id.document != self.id {
            return None;
        }
        self.markers.get(&id.index).copied()
    }

    /// Check if a marker is still tracked
    pub fn is_valid(&self, id: RangeId) -> bool {
        self.range(id).is_some()
    }

    /// Stop tracking a marker; returns whether it was still live
    pub fn release_range(&mut self, id: RangeId) -> bool {
        id.document == self.id && self.markers.remove(&id.index).is_some()
    }

    /// Get the number of live markers
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Replace the text under a marker.
    ///
    /// The marker then covers exactly the new text, even when it was empty,
    /// while every other marker is adjusted like for [`Document::replace`].
    /// Empty markers created before it at the same offset are left in front
    /// of the new text.
    pub fn replace_range_contents(
        &mut self,
        id: RangeId,
        text: &str,
    ) -> Result<TextRange, DocumentError> {
        let range = self.range(id).ok_or(DocumentError::UnknownRange(id))?;
        self.replace_impl(range, text, Some(id.index))?;
        self.range(id).ok_or(DocumentError::UnknownRange(id))
    }

    /// Drain the markers invalidated since the last call
    pub fn take_invalidated(&mut self) -> Vec<RangeId> {
        std::mem::take(&mut self.invalidated)
    }

    /// Check if invalidated markers are waiting to be drained
    pub fn has_pending_invalidations(&self) -> bool {
        !self.invalidated.is_empty()
    }

    fn check_range(&self, range: TextRange) -> Result<(), DocumentError> {
        if range.start > range.end {
            return Err(DocumentError::InvertedRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.end > self.text.len_chars() {
            return Err(DocumentError::OutOfBounds {
                range,
                len: self.text.len_chars(),
            });
        }
        Ok(())
    }

    fn replace_impl(
        &mut self,
        range: TextRange,
        text: &str,
        keep: Option<u64>,
    ) -> Result<(), DocumentError> {
        self.check_range(range)?;

        let new_len = text.chars().count();
        self.text.remove(range.to_range());
        self.text.insert(range.start, text);
        self.modification_stamp += 1;

        let edit = Edit::new(range, new_len);
        let mut lost = Vec::new();
        for (index, marker) in self.markers.iter_mut() {
            if let Some(kept) = keep {
                if kept == *index {
                    *marker = TextRange::from_len(range.start, new_len);
                    continue;
                }
                // Older empty markers at the same offset stay in front of the kept one
                if *index < kept && marker.is_empty() && marker.start == range.start {
                    continue;
                }
            }
            match adjust_range(*marker, &edit) {
                Some(adjusted) => *marker = adjusted,
                None => lost.push(*index),
            }
        }

        for index in lost {
            self.markers.remove(&index);
            let id = RangeId {
                document: self.id,
                index,
            };
            trace!("{} invalidated by edit of {}", id, range);
            self.invalidated.push(id);
        }

        Ok(())
    }
}
