// Pairwise diff primitive for the merge engine
// This crate computes ordered, contiguous equal/changed fragments between two texts

mod buffer_diff;
mod config;
mod diff_fragment;
mod error;
mod text_diff;
mod text_range;

pub use buffer_diff::{BufferDiff, BufferDiffSnapshot};
pub use config::{DiffConfig, DiffGranularity};
pub use diff_fragment::{DiffFragment, DiffFragmentStatus};
pub use error::DiffError;
pub use text_diff::TextDiff;
pub use text_range::TextRange;

pub use similar::Algorithm;
