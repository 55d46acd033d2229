//! The change hierarchy, stored in an arena.
//!
//! A [`SimpleChange`] stands alone in one change list. A [`TwoSideChange`]
//! owns the base range of a fragment both versions touched and links the two
//! [`SideChange`] halves that sit in the left and right lists. Links are
//! plain ids; slots are tombstoned on removal and never reused, so a stale
//! id simply stops resolving.

use derive_more::Display;
use text_document::RangeId;

use crate::change_type::ChangeType;
use crate::side::Side;

/// Handle to a change in one of the two change lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "change#{}", _0)]
pub struct ChangeId(usize);

/// Handle to a two-side change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display(fmt = "pair#{}", _0)]
pub struct TwoSideId(usize);

/// Whether the two halves of a two-side change agree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TwoSideKind {
    #[display(fmt = "Conflict")]
    Conflict,

    #[display(fmt = "NoConflict")]
    NoConflict,
}

/// A change made by one version only
#[derive(Debug, Clone)]
pub struct SimpleChange {
    side: Side,
    change_type: ChangeType,
    base: RangeId,
    range: RangeId,
}

impl SimpleChange {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    /// The live range in the base document
    pub fn base_range_id(&self) -> RangeId {
        self.base
    }

    /// The live range in this side's document
    pub fn range_id(&self) -> RangeId {
        self.range
    }
}

/// One half of a [`TwoSideChange`]
#[derive(Debug, Clone)]
pub struct SideChange {
    side: Side,
    change_type: ChangeType,
    parent: TwoSideId,
    range: RangeId,
}

impl SideChange {
    pub fn side(&self) -> Side {
        self.side
    }

    pub fn change_type(&self) -> ChangeType {
        self.change_type
    }

    pub fn parent(&self) -> TwoSideId {
        self.parent
    }

    /// The live range in this side's document
    pub fn range_id(&self) -> RangeId {
        self.range
    }
}

/// An entry of a change list
#[derive(Debug, Clone)]
pub enum Change {
    Simple(SimpleChange),
    Side(SideChange),
}

impl Change {
    pub fn side(&self) -> Side {
        match self {
            Change::Simple(change) => change.side(),
            Change::Side(change) => change.side(),
        }
    }

    pub fn change_type(&self) -> ChangeType {
        match self {
            Change::Simple(change) => change.change_type(),
            Change::Side(change) => change.change_type(),
        }
    }

    /// The live range in this change's own version
    pub fn range_id(&self) -> RangeId {
        match self {
            Change::Simple(change) => change.range_id(),
            Change::Side(change) => change.range_id(),
        }
    }

    /// The owning two-side change, if any
    pub fn parent(&self) -> Option<TwoSideId> {
        match self {
            Change::Simple(_) => None,
            Change::Side(change) => Some(change.parent),
        }
    }

    fn mark_applied(&mut self) {
        match self {
            Change::Simple(change) => change.change_type = change.change_type.applied(),
            Change::Side(change) => change.change_type = change.change_type.applied(),
        }
    }
}

/// A fragment changed in both versions: a conflict, or the same edit twice
#[derive(Debug, Clone)]
pub struct TwoSideChange {
    kind: TwoSideKind,
    base: RangeId,
    left: Option<ChangeId>,
    right: Option<ChangeId>,
}

impl TwoSideChange {
    pub fn kind(&self) -> TwoSideKind {
        self.kind
    }

    pub fn is_conflict(&self) -> bool {
        self.kind == TwoSideKind::Conflict
    }

    /// The live range in the base document
    pub fn base_range_id(&self) -> RangeId {
        self.base
    }

    /// The half living in the given side's list
    pub fn side(&self, side: Side) -> Option<ChangeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Unlink one half, leaving the other in place
    pub(crate) fn detach(&mut self, side: Side) -> Option<ChangeId> {
        match side {
            Side::Left => self.left.take(),
            Side::Right => self.right.take(),
        }
    }
}

/// Live ranges of a new two-side change, one per document
pub(crate) struct PairRanges {
    pub base: RangeId,
    pub left: (RangeId, ChangeType),
    pub right: (RangeId, ChangeType),
}

/// Tombstoned storage for changes and two-side changes
#[derive(Debug, Default)]
pub(crate) struct ChangeArena {
    changes: Vec<Option<Change>>,
    pairs: Vec<Option<TwoSideChange>>,
}

impl ChangeArena {
    pub fn insert_simple(
        &mut self,
        side: Side,
        change_type: ChangeType,
        base: RangeId,
        range: RangeId,
    ) -> ChangeId {
        self.push_change(Change::Simple(SimpleChange {
            side,
            change_type,
            base,
            range,
        }))
    }

    pub fn insert_pair(&mut self, kind: TwoSideKind, ranges: PairRanges) -> (TwoSideId, ChangeId, ChangeId) {
        let pair_id = TwoSideId(self.pairs.len());
        let left = self.push_change(Change::Side(SideChange {
            side: Side::Left,
            change_type: ranges.left.1,
            parent: pair_id,
            range: ranges.left.0,
        }));
        let right = self.push_change(Change::Side(SideChange {
            side: Side::Right,
            change_type: ranges.right.1,
            parent: pair_id,
            range: ranges.right.0,
        }));
        self.pairs.push(Some(TwoSideChange {
            kind,
            base: ranges.base,
            left: Some(left),
            right: Some(right),
        }));
        (pair_id, left, right)
    }

    fn push_change(&mut self, change: Change) -> ChangeId {
        let id = ChangeId(self.changes.len());
        self.changes.push(Some(change));
        id
    }

    pub fn change(&self, id: ChangeId) -> Option<&Change> {
        self.changes.get(id.0)?.as_ref()
    }

    pub fn pair(&self, id: TwoSideId) -> Option<&TwoSideChange> {
        self.pairs.get(id.0)?.as_ref()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (TwoSideId, &TwoSideChange)> {
        self.pairs
            .iter()
            .enumerate()
            .filter_map(|(index, pair)| Some((TwoSideId(index), pair.as_ref()?)))
    }

    pub fn take_change(&mut self, id: ChangeId) -> Option<Change> {
        self.changes.get_mut(id.0)?.take()
    }

    pub fn take_pair(&mut self, id: TwoSideId) -> Option<TwoSideChange> {
        self.pairs.get_mut(id.0)?.take()
    }

    /// The base range of a change, its own or its parent's
    pub fn base_range_id(&self, change: &Change) -> Option<RangeId> {
        match change {
            Change::Simple(change) => Some(change.base),
            Change::Side(change) => self.pair(change.parent).map(|pair| pair.base),
        }
    }

    /// The other half of a two-side change
    pub fn twin(&self, id: ChangeId) -> Option<ChangeId> {
        let change = self.change(id)?;
        let pair = self.pair(change.parent()?)?;
        pair.side(change.side().other())
    }

    /// Mark a change applied; a two-side half takes its twin along.
    ///
    /// Returns every change whose state moved from pending to applied.
    pub fn mark_applied(&mut self, id: ChangeId) -> Vec<ChangeId> {
        let mut marked = Vec::new();
        for target in std::iter::once(id).chain(self.twin(id)) {
            if let Some(Some(change)) = self.changes.get_mut(target.0) {
                if !change.change_type().applied {
                    change.mark_applied();
                    marked.push(target);
                }
            }
        }
        marked
    }
}
