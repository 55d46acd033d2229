//! Three-way alignment of a base text with its two derived versions.
//!
//! Both versions are diffed against the base on their own. Base regions that
//! are equal in *both* diffs are "sync" regions; everything between two
//! consecutive sync regions becomes one [`MergeFragment`], aligned across all
//! three texts.

use buffer_diff::{DiffConfig, DiffError, DiffFragment, TextRange};
use log::debug;

use crate::side::Version;

/// A region aligned across base, left and right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeFragment {
    pub base: TextRange,
    pub left: TextRange,
    pub right: TextRange,
}

impl MergeFragment {
    pub fn new(base: TextRange, left: TextRange, right: TextRange) -> Self {
        Self { base, left, right }
    }

    /// The range in the given version
    pub fn range(&self, version: Version) -> TextRange {
        match version {
            Version::Left => self.left,
            Version::Base => self.base,
            Version::Right => self.right,
        }
    }

    /// Check if the fragment covers nothing in all three texts
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.left.is_empty() && self.right.is_empty()
    }
}

/// One piece of the full three-way tiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRegion {
    /// Equal in all three texts
    Unchanged(MergeFragment),

    /// Differs from the base in at least one version
    Changed(MergeFragment),
}

impl MergeRegion {
    pub fn fragment(&self) -> &MergeFragment {
        match self {
            MergeRegion::Unchanged(fragment) | MergeRegion::Changed(fragment) => fragment,
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, MergeRegion::Changed(_))
    }
}

/// A base region one diff calls equal, with the matching version offset
#[derive(Debug, Clone, Copy)]
struct EqualRun {
    base: TextRange,
    version_start: usize,
}

impl EqualRun {
    fn version_offset(&self, base_offset: usize) -> usize {
        self.version_start + (base_offset - self.base.start)
    }
}

fn equal_runs(fragments: &[DiffFragment]) -> Vec<EqualRun> {
    fragments
        .iter()
        .filter(|fragment| fragment.is_equal() && !fragment.old_range.is_empty())
        .map(|fragment| EqualRun {
            base: fragment.old_range,
            version_start: fragment.new_range.start,
        })
        .collect()
}

/// Turns the sync regions found by the sweep into a contiguous tiling
#[derive(Default)]
struct RegionBuilder {
    regions: Vec<MergeRegion>,
    base: usize,
    left: usize,
    right: usize,
}

impl RegionBuilder {
    /// Record a region equal in both diffs, closing the changed region before it
    fn sync(&mut self, base: TextRange, left_start: usize, right_start: usize) {
        let changed = MergeFragment::new(
            TextRange::new(self.base, base.start),
            TextRange::new(self.left, left_start),
            TextRange::new(self.right, right_start),
        );
        if !changed.is_empty() {
            self.regions.push(MergeRegion::Changed(changed));
        }

        self.base = base.end;
        self.left = left_start + base.len();
        self.right = right_start + base.len();

        if base.is_empty() {
            return;
        }
        let unchanged = MergeFragment::new(
            base,
            TextRange::from_len(left_start, base.len()),
            TextRange::from_len(right_start, base.len()),
        );
        if let Some(MergeRegion::Unchanged(previous)) = self.regions.last_mut() {
            if previous.base.end == base.start {
                previous.base.end = unchanged.base.end;
                previous.left.end = unchanged.left.end;
                previous.right.end = unchanged.right.end;
                return;
            }
        }
        self.regions.push(MergeRegion::Unchanged(unchanged));
    }

    fn finish(mut self, base_len: usize, left_len: usize, right_len: usize) -> Vec<MergeRegion> {
        self.sync(TextRange::empty(base_len), left_len, right_len);
        self.regions
    }
}

/// Partitions a base text and two versions into aligned fragments
pub struct FragmentPartitioner<'a> {
    config: &'a DiffConfig,
}

impl<'a> FragmentPartitioner<'a> {
    pub fn new(config: &'a DiffConfig) -> Self {
        Self { config }
    }

    /// The fragments where at least one version differs from the base.
    ///
    /// Fails with [`DiffError::TooLarge`] when either pairwise diff refuses
    /// its input.
    pub fn partition(
        &self,
        base: &str,
        left: &str,
        right: &str,
    ) -> Result<Vec<MergeFragment>, DiffError> {
        Ok(self
            .regions(base, left, right)?
            .into_iter()
            .filter_map(|region| match region {
                MergeRegion::Changed(fragment) => Some(fragment),
                MergeRegion::Unchanged(_) => None,
            })
            .collect())
    }

    /// The full tiling of all three texts, unchanged regions included
    pub fn regions(
        &self,
        base: &str,
        left: &str,
        right: &str,
    ) -> Result<Vec<MergeRegion>, DiffError> {
        let left_diff = self.config.diff(base, left)?;
        let right_diff = self.config.diff(base, right)?;

        let left_runs = equal_runs(left_diff.fragments());
        let right_runs = equal_runs(right_diff.fragments());

        let mut builder = RegionBuilder::default();
        let (mut l, mut r) = (0, 0);
        while let (Some(left_run), Some(right_run)) = (left_runs.get(l), right_runs.get(r)) {
            if let Some(common) = left_run.base.intersection(&right_run.base) {
                builder.sync(
                    common,
                    left_run.version_offset(common.start),
                    right_run.version_offset(common.start),
                );
            }

            // Advance the stream whose run ends first; the left one on a tie
            if left_run.base.end <= right_run.base.end {
                l += 1;
            } else {
                r += 1;
            }
        }

        let regions = builder.finish(
            left_diff.old_text().len_chars(),
            left_diff.new_text().len_chars(),
            right_diff.new_text().len_chars(),
        );
        debug!(
            "partitioned {} base chars into {} regions ({} changed)",
            left_diff.old_text().len_chars(),
            regions.len(),
            regions.iter().filter(|r| r.is_changed()).count()
        );
        Ok(regions)
    }
}
