use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::text_range::TextRange;

/// Represents the status of a diff fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DiffFragmentStatus {
    /// The fragment represents added content (only exists in new version)
    #[display(fmt = "Added")]
    Added,

    /// The fragment represents deleted content (only exists in old version)
    #[display(fmt = "Deleted")]
    Deleted,

    /// The fragment represents modified content (exists in both versions but different)
    #[display(fmt = "Modified")]
    Modified,

    /// The fragment represents unchanged content (exists in both versions and identical)
    #[display(fmt = "Unchanged")]
    Unchanged,
}

impl DiffFragmentStatus {
    /// Derive the status of a changed fragment from the lengths of its two sides
    pub fn changed(old_len: usize, new_len: usize) -> Self {
        match (old_len, new_len) {
            (0, _) => DiffFragmentStatus::Added,
            (_, 0) => DiffFragmentStatus::Deleted,
            _ => DiffFragmentStatus::Modified,
        }
    }
}

/// An aligned region of two texts, either identical on both sides or changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffFragment {
    /// The status of the fragment
    pub status: DiffFragmentStatus,

    /// The chars covered in the old version
    pub old_range: TextRange,

    /// The chars covered in the new version
    pub new_range: TextRange,
}

impl DiffFragment {
    /// Create an unchanged fragment; both sides must have the same length
    pub fn equal(old_range: TextRange, new_range: TextRange) -> Self {
        debug_assert_eq!(old_range.len(), new_range.len());
        Self {
            status: DiffFragmentStatus::Unchanged,
            old_range,
            new_range,
        }
    }

    /// Create a changed fragment, deriving its status from the range lengths
    pub fn changed(old_range: TextRange, new_range: TextRange) -> Self {
        Self {
            status: DiffFragmentStatus::changed(old_range.len(), new_range.len()),
            old_range,
            new_range,
        }
    }

    /// Check if both sides of this fragment are identical
    pub fn is_equal(&self) -> bool {
        self.status == DiffFragmentStatus::Unchanged
    }

    /// Check if this fragment has any changes
    pub fn has_changes(&self) -> bool {
        !self.is_equal()
    }
}
