//! Incremental three-way merge.
//!
//! A [`MergeList`] aligns a base text with two derived versions, classifies
//! every region where they differ and keeps each resulting change bound to
//! live ranges in the three documents. Changes can then be applied, ignored
//! or invalidated by further edits while the lists stay ordered.
//!
//! ```
//! use incremental_merge::{MergeConfig, MergeList, Side};
//!
//! let mut merge = MergeList::from_texts("A\nX\nC\n", "A\nB\nC\n", "A\nB\nC\n", &MergeConfig::default());
//! let id = merge.changes(Side::Left).changes()[0];
//! merge.apply(id).unwrap();
//! assert_eq!(merge.result_text(), "A\nX\nC\n");
//! assert!(merge.is_all_resolved());
//! ```

mod change;
mod change_list;
mod change_type;
mod classify;
mod config;
mod document_edit;
mod error;
mod event;
mod fragment;
mod merge_list;
mod side;

pub use change::{Change, ChangeId, SideChange, SimpleChange, TwoSideChange, TwoSideId, TwoSideKind};
pub use change_list::ChangeList;
pub use change_type::{ChangeKind, ChangeType};
pub use classify::{Classification, RegionClassifier};
pub use config::MergeConfig;
pub use document_edit::DocumentEdit;
pub use error::MergeError;
pub use event::{MergeEvent, RemovalReason};
pub use fragment::{FragmentPartitioner, MergeFragment, MergeRegion};
pub use merge_list::{ApplyOutcome, ChangeCounter, ChangeRef, MergeList};
pub use side::{Side, Version};

pub use buffer_diff::{DiffConfig, DiffError, DiffGranularity, TextRange};
pub use text_document::{Document, DocumentId, RangeId};
