use ropey::Rope;

use crate::fragment::MergeFragment;
use crate::side::{Side, Version};

/// What happened to a fragment's base text in the two versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// All three texts agree; nothing to merge
    Unchanged,

    /// Both versions replaced the base with the same text
    NoConflict,

    /// Only the given side differs from the base
    OneSided(Side),

    /// Both versions replaced the base, differently
    Conflict,
}

/// Compares the three texts of a fragment
pub struct RegionClassifier<'a> {
    base: &'a Rope,
    left: &'a Rope,
    right: &'a Rope,
}

impl<'a> RegionClassifier<'a> {
    pub fn new(base: &'a Rope, left: &'a Rope, right: &'a Rope) -> Self {
        Self { base, left, right }
    }

    fn text(&self, version: Version) -> &'a Rope {
        match version {
            Version::Left => self.left,
            Version::Base => self.base,
            Version::Right => self.right,
        }
    }

    fn same(&self, fragment: &MergeFragment, a: Version, b: Version) -> bool {
        let a_range = fragment.range(a);
        let b_range = fragment.range(b);
        a_range.len() == b_range.len()
            && self.text(a).slice(a_range.to_range()) == self.text(b).slice(b_range.to_range())
    }

    /// Classify a fragment by content, not by range equality
    pub fn classify(&self, fragment: &MergeFragment) -> Classification {
        if self.same(fragment, Version::Left, Version::Right) {
            if self.same(fragment, Version::Base, Version::Left) {
                Classification::Unchanged
            } else {
                Classification::NoConflict
            }
        } else if self.same(fragment, Version::Base, Version::Left) {
            Classification::OneSided(Side::Right)
        } else if self.same(fragment, Version::Base, Version::Right) {
            Classification::OneSided(Side::Left)
        } else {
            Classification::Conflict
        }
    }
}
