use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use buffer_diff::TextRange;

/// Structural kind of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChangeKind {
    /// Text only present in the version
    #[display(fmt = "Insertion")]
    Insertion,

    /// Text only present in the base
    #[display(fmt = "Deletion")]
    Deletion,

    /// Text replaced by different text
    #[display(fmt = "Modification")]
    Modification,

    /// Both versions replaced the base differently
    #[display(fmt = "Conflict")]
    Conflict,
}

/// The kind of a change plus whether it has been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChangeType {
    pub kind: ChangeKind,
    pub applied: bool,
}

impl ChangeType {
    /// Derive the kind from the base-side and version-side ranges.
    ///
    /// Never yields [`ChangeKind::Conflict`]; conflicts are assigned by the
    /// classifier through [`ChangeType::conflict`].
    pub fn from_ranges(base: TextRange, version: TextRange) -> Self {
        let kind = if base.is_empty() {
            ChangeKind::Insertion
        } else if version.is_empty() {
            ChangeKind::Deletion
        } else {
            ChangeKind::Modification
        };
        Self {
            kind,
            applied: false,
        }
    }

    /// A pending conflict
    pub fn conflict() -> Self {
        Self {
            kind: ChangeKind::Conflict,
            applied: false,
        }
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == ChangeKind::Conflict
    }

    /// The same kind, applied
    pub fn applied(self) -> Self {
        Self {
            applied: true,
            ..self
        }
    }
}
