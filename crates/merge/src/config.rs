//! Configuration for building a merge list.

use buffer_diff::DiffConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options passed to [`crate::MergeList::create`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MergeConfig {
    /// Whether merging runs at all. A disabled config yields an empty merge
    /// list without diffing anything.
    pub enabled: bool,

    /// How each version is compared against the base.
    pub diff: DiffConfig,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            diff: DiffConfig::default(),
        }
    }
}

impl MergeConfig {
    /// Create new merge options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable merging.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the pairwise diff options.
    pub fn diff(mut self, diff: DiffConfig) -> Self {
        self.diff = diff;
        self
    }
}
