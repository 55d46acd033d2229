use std::collections::HashMap;

use buffer_diff::TextRange;
use log::{debug, trace, warn};
use text_document::{Document, DocumentError, RangeId};

use crate::change::{Change, ChangeArena, ChangeId, PairRanges, TwoSideChange, TwoSideId, TwoSideKind};
use crate::change_list::ChangeList;
use crate::change_type::{ChangeKind, ChangeType};
use crate::classify::{Classification, RegionClassifier};
use crate::config::MergeConfig;
use crate::document_edit::DocumentEdit;
use crate::error::MergeError;
use crate::event::{MergeEvent, RemovalReason};
use crate::fragment::{FragmentPartitioner, MergeFragment};
use crate::side::{Side, Version};

/// Result of [`MergeList::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The version's text was written into the base
    Applied,

    /// Nothing to do; the change was applied before
    AlreadyApplied,

    /// The change is gone, usually because an edit invalidated it
    Stale,
}

/// Pending work left in a merge list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangeCounter {
    /// Pending non-conflicting changes; a two-side pair counts once
    pub changes: usize,

    /// Pending conflicts
    pub conflicts: usize,
}

impl ChangeCounter {
    pub fn is_empty(&self) -> bool {
        self.changes == 0 && self.conflicts == 0
    }
}

/// What a live range belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeOwner {
    Change(ChangeId),
    Pair(TwoSideId),
}

/// A three-way merge bound to live documents.
///
/// Owns the base, left and right documents and the two change lists
/// comparing each version with the shared base. Every mutation goes through
/// the merge list, which drains the documents' invalidation queues once the
/// edit is complete.
#[derive(Debug)]
pub struct MergeList {
    left: Document,
    base: Document,
    right: Document,

    left_changes: ChangeList,
    right_changes: ChangeList,

    arena: ChangeArena,
    owners: HashMap<RangeId, RangeOwner>,
    events: Vec<MergeEvent>,

    /// Set when the diff refused the input
    error_message: Option<String>,
}

impl MergeList {
    /// Build a merge list from three documents.
    ///
    /// Never fails on bad input: when the pairwise diff refuses the texts the
    /// list is empty and [`MergeList::error_message`] says why.
    pub fn create(left: Document, base: Document, right: Document, config: &MergeConfig) -> Self {
        assert!(
            left.id() != base.id() && right.id() != base.id() && left.id() != right.id(),
            "a merge needs three distinct documents"
        );

        let mut list = Self {
            left_changes: ChangeList::new(Side::Left, base.id(), left.id()),
            right_changes: ChangeList::new(Side::Right, base.id(), right.id()),
            left,
            base,
            right,
            arena: ChangeArena::default(),
            owners: HashMap::new(),
            events: Vec::new(),
            error_message: None,
        };
        debug_assert_eq!(
            list.left_changes.base_document(),
            list.right_changes.base_document()
        );

        if !config.enabled {
            debug!("merging is disabled, leaving the change lists empty");
            return list;
        }

        let base_text = list.base.contents();
        let left_text = list.left.contents();
        let right_text = list.right.contents();
        let partitioner = FragmentPartitioner::new(&config.diff);

        match partitioner.partition(&base_text, &left_text, &right_text) {
            Ok(fragments) => {
                for fragment in fragments {
                    if let Err(err) = list.add_fragment(&fragment) {
                        panic!("fragment {fragment:?} does not fit its documents: {err}");
                    }
                }
            }
            Err(err) => {
                warn!("three-way merge refused: {}", err);
                list.error_message = Some(err.to_string());
            }
        }

        debug!(
            "created merge list with {} left and {} right changes",
            list.left_changes.len(),
            list.right_changes.len()
        );
        list
    }

    /// Build a merge list from plain texts
    pub fn from_texts(left: &str, base: &str, right: &str, config: &MergeConfig) -> Self {
        Self::create(
            Document::new(left),
            Document::new(base),
            Document::new(right),
            config,
        )
    }

    fn add_fragment(&mut self, fragment: &MergeFragment) -> Result<(), DocumentError> {
        let classification =
            RegionClassifier::new(self.base.text(), self.left.text(), self.right.text())
                .classify(fragment);

        match classification {
            Classification::Unchanged => {
                trace!("skipping fragment {:?} equal in all versions", fragment);
            }
            Classification::OneSided(side) => {
                let version = Version::from(side);
                let base = self.base.create_range(fragment.base)?;
                let range = self.document_mut(version).create_range(fragment.range(version))?;
                let change_type = ChangeType::from_ranges(fragment.base, fragment.range(version));

                let id = self.arena.insert_simple(side, change_type, base, range);
                self.list_mut(side).push(id);
                self.owners.insert(base, RangeOwner::Change(id));
                self.owners.insert(range, RangeOwner::Change(id));
            }
            Classification::NoConflict | Classification::Conflict => {
                let (kind, left_type, right_type) = if classification == Classification::Conflict {
                    (TwoSideKind::Conflict, ChangeType::conflict(), ChangeType::conflict())
                } else {
                    (
                        TwoSideKind::NoConflict,
                        ChangeType::from_ranges(fragment.base, fragment.left),
                        ChangeType::from_ranges(fragment.base, fragment.right),
                    )
                };
                let ranges = PairRanges {
                    base: self.base.create_range(fragment.base)?,
                    left: (self.left.create_range(fragment.left)?, left_type),
                    right: (self.right.create_range(fragment.right)?, right_type),
                };
                let (base, left_range, right_range) = (ranges.base, ranges.left.0, ranges.right.0);

                let (pair, left, right) = self.arena.insert_pair(kind, ranges);
                self.left_changes.push(left);
                self.right_changes.push(right);
                self.owners.insert(base, RangeOwner::Pair(pair));
                self.owners.insert(left_range, RangeOwner::Change(left));
                self.owners.insert(right_range, RangeOwner::Change(right));
            }
        }
        Ok(())
    }

    /// The error recorded when the diff refused the input
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// The change list comparing the given side with the base
    pub fn changes(&self, side: Side) -> &ChangeList {
        match side {
            Side::Left => &self.left_changes,
            Side::Right => &self.right_changes,
        }
    }

    fn list_mut(&mut self, side: Side) -> &mut ChangeList {
        match side {
            Side::Left => &mut self.left_changes,
            Side::Right => &mut self.right_changes,
        }
    }

    /// Views of the given side's changes, in base order
    pub fn iter_changes(&self, side: Side) -> impl Iterator<Item = ChangeRef<'_>> + '_ {
        self.changes(side).iter().filter_map(move |id| self.change(id))
    }

    /// A read view of a live change
    pub fn change(&self, id: ChangeId) -> Option<ChangeRef<'_>> {
        let change = self.arena.change(id)?;
        Some(ChangeRef {
            list: self,
            id,
            change,
        })
    }

    /// A live two-side change
    pub fn two_side_change(&self, id: TwoSideId) -> Option<&TwoSideChange> {
        self.arena.pair(id)
    }

    /// All live two-side changes
    pub fn two_side_changes(&self) -> impl Iterator<Item = (TwoSideId, &TwoSideChange)> {
        self.arena.pairs()
    }

    /// Check if a change is still in its list with all of its ranges live
    pub fn is_valid(&self, id: ChangeId) -> bool {
        let Some(change) = self.arena.change(id) else {
            return false;
        };
        let twin_live = self.arena.twin(id).map_or(change.parent().is_none(), |twin| {
            self.range(twin, twin_side(change.side())).is_some()
        });
        twin_live
            && self.range(id, Version::Base).is_some()
            && self.range(id, change.side().into()).is_some()
    }

    /// The current range of a change in one of the three documents.
    ///
    /// A simple change has no range in the other side's document; a two-side
    /// half answers for its twin.
    pub fn range(&self, id: ChangeId, version: Version) -> Option<TextRange> {
        let change = self.arena.change(id)?;
        let range_id = match version.side() {
            None => self.arena.base_range_id(change)?,
            Some(side) if side == change.side() => change.range_id(),
            Some(_) => {
                let twin = self.arena.twin(id)?;
                self.arena.change(twin)?.range_id()
            }
        };
        self.document(version).range(range_id)
    }

    /// One of the three documents
    pub fn document(&self, version: Version) -> &Document {
        match version {
            Version::Left => &self.left,
            Version::Base => &self.base,
            Version::Right => &self.right,
        }
    }

    fn document_mut(&mut self, version: Version) -> &mut Document {
        match version {
            Version::Left => &mut self.left,
            Version::Base => &mut self.base,
            Version::Right => &mut self.right,
        }
    }

    /// The merged text so far
    pub fn result_text(&self) -> String {
        self.base.contents()
    }

    /// Edit one of the documents, then drop changes whose ranges it destroyed
    pub fn edit(&mut self, version: Version, range: TextRange, text: &str) -> Result<(), MergeError> {
        self.document_mut(version).replace(range, text)?;
        self.dispatch_invalidations();
        Ok(())
    }

    /// Run several edits on one document, then drop changes whose ranges
    /// they destroyed
    pub fn with_document_mut<R>(
        &mut self,
        version: Version,
        f: impl FnOnce(&mut DocumentEdit<'_>) -> R,
    ) -> R {
        let result = f(&mut DocumentEdit::new(self.document_mut(version)));
        self.dispatch_invalidations();
        result
    }

    /// Accept a change's text as the merged result for its fragment.
    ///
    /// Applying a two-side half marks its twin applied as well. Both stay in
    /// their lists as resolved entries.
    pub fn apply(&mut self, id: ChangeId) -> Result<ApplyOutcome, MergeError> {
        self.dispatch_invalidations();

        let Some(change) = self.arena.change(id) else {
            debug!("{} is gone, nothing to apply", id);
            return Ok(ApplyOutcome::Stale);
        };
        if change.change_type().applied {
            return Ok(ApplyOutcome::AlreadyApplied);
        }

        let side = change.side();
        let range_id = change.range_id();
        let Some(base_range_id) = self.arena.base_range_id(change) else {
            panic!("{id} lost its two-side parent without being dissolved");
        };
        assert_eq!(
            base_range_id.document(),
            self.base.id(),
            "{id} is bound to a document other than the shared base"
        );

        let version = self.document(side.into());
        let range = version
            .range(range_id)
            .ok_or(DocumentError::UnknownRange(range_id))?;
        let text = version.slice(range)?;
        self.base.replace_range_contents(base_range_id, &text)?;

        for marked in self.arena.mark_applied(id) {
            let side = self.arena.change(marked).map_or(side, Change::side);
            self.events.push(MergeEvent::Applied {
                change: marked,
                side,
            });
        }
        debug!("applied {} from the {} side", id, side);

        self.dispatch_invalidations();
        Ok(ApplyOutcome::Applied)
    }

    /// Apply every pending change that is not a conflict; returns how many
    /// fragments were written
    pub fn apply_non_conflicting(&mut self) -> Result<usize, MergeError> {
        let candidates: Vec<ChangeId> = Side::BOTH
            .iter()
            .flat_map(|&side| self.iter_changes(side))
            .filter(|change| !change.is_conflict() && !change.is_applied())
            .map(|change| change.id())
            .collect();

        let mut applied = 0;
        for id in candidates {
            if self.apply(id)? == ApplyOutcome::Applied {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Remove a change from its list.
    ///
    /// Removing either half of a two-side change removes both. Returns
    /// `false` if the change was already gone.
    pub fn remove(&mut self, id: ChangeId) -> bool {
        self.dispatch_invalidations();
        if !self.is_valid(id) {
            return false;
        }
        self.drop_change(id, RemovalReason::Ignored);
        true
    }

    /// Drain the events recorded since the last call
    pub fn take_events(&mut self) -> Vec<MergeEvent> {
        std::mem::take(&mut self.events)
    }

    /// Count the pending changes and conflicts
    pub fn counter(&self) -> ChangeCounter {
        let mut counter = ChangeCounter::default();
        for side in Side::BOTH {
            for change in self.iter_changes(side) {
                // A pair is counted through its left half
                if change.is_applied() || (change.two_side().is_some() && side == Side::Right) {
                    continue;
                }
                if change.is_conflict() {
                    counter.conflicts += 1;
                } else {
                    counter.changes += 1;
                }
            }
        }
        counter
    }

    /// Check if nothing is left to resolve
    pub fn is_all_resolved(&self) -> bool {
        self.counter().is_empty()
    }

    /// The change whose range in `version` contains `offset`.
    ///
    /// An empty range matches its own offset. Base offsets are looked up in
    /// the left list first.
    pub fn change_at(&self, version: Version, offset: usize) -> Option<ChangeId> {
        let sides = match version.side() {
            Some(side) => vec![side],
            None => Side::BOTH.to_vec(),
        };
        sides
            .into_iter()
            .flat_map(|side| self.changes(side).iter())
            .find(|&id| {
                self.range(id, version).is_some_and(|range| {
                    range.contains(offset) || (range.is_empty() && range.start == offset)
                })
            })
    }

    fn drop_change(&mut self, id: ChangeId, reason: RemovalReason) {
        match self.arena.change(id).map(Change::parent) {
            None => {}
            Some(None) => self.remove_simple(id, reason),
            Some(Some(pair)) => self.dissolve(pair, Some(id), reason),
        }
    }

    fn remove_simple(&mut self, id: ChangeId, reason: RemovalReason) {
        let Some(Change::Simple(change)) = self.arena.take_change(id) else {
            panic!("{id} is not a simple change");
        };
        let side = change.side();

        self.list_mut(side).remove(id);
        self.release(Version::Base, change.base_range_id());
        self.release(side.into(), change.range_id());

        trace!("removed {} from the {} list ({})", id, side, reason);
        self.events.push(MergeEvent::Removed {
            change: id,
            side,
            reason,
        });
    }

    /// Remove both halves of a two-side change and its base range together.
    ///
    /// `origin` is the half that triggered the removal and carries `reason`;
    /// the other half is reported as dissolved.
    fn dissolve(&mut self, pair_id: TwoSideId, origin: Option<ChangeId>, reason: RemovalReason) {
        let Some(mut pair) = self.arena.take_pair(pair_id) else {
            return;
        };

        for side in Side::BOTH {
            let Some(child) = pair.detach(side) else {
                panic!("{pair_id} lost its {side} half without being dissolved");
            };
            let Some(change) = self.arena.take_change(child) else {
                panic!("{pair_id} links to {child}, which is already gone");
            };

            self.list_mut(side).remove(child);
            self.release(side.into(), change.range_id());

            let reason = match origin {
                Some(origin) if origin != child => RemovalReason::Dissolved,
                _ => reason,
            };
            trace!("removed {} from the {} list ({})", child, side, reason);
            self.events.push(MergeEvent::Removed {
                change: child,
                side,
                reason,
            });
        }

        self.release(Version::Base, pair.base_range_id());
        self.events.push(MergeEvent::PairDissolved {
            pair: pair_id,
            kind: pair.kind(),
        });
    }

    fn release(&mut self, version: Version, range_id: RangeId) {
        self.owners.remove(&range_id);
        self.document_mut(version).release_range(range_id);
    }

    /// Drop every change whose range an edit destroyed.
    ///
    /// Runs after each mutation, never from inside one, so no document is
    /// being edited while changes are removed.
    fn dispatch_invalidations(&mut self) {
        for version in Version::ALL {
            let invalidated = self.document_mut(version).take_invalidated();
            for range_id in invalidated {
                self.invalidate(range_id);
            }
        }

        // Markers that vanished without passing through a queue
        let mut lost: Vec<RangeId> = self
            .owners
            .keys()
            .copied()
            .filter(|&range_id| !Version::ALL.iter().any(|&v| self.document(v).is_valid(range_id)))
            .collect();
        lost.sort();
        for range_id in lost {
            self.invalidate(range_id);
        }

        debug_assert!(self.is_ordered(Side::Left) && self.is_ordered(Side::Right));
    }

    fn invalidate(&mut self, range_id: RangeId) {
        let Some(owner) = self.owners.get(&range_id).copied() else {
            return;
        };
        trace!("{} was invalidated", range_id);
        match owner {
            RangeOwner::Change(id) => self.drop_change(id, RemovalReason::Invalidated),
            RangeOwner::Pair(pair) => self.dissolve(pair, None, RemovalReason::Invalidated),
        }
    }

    /// Check that a list's entries are sorted by base start and do not overlap
    pub fn is_ordered(&self, side: Side) -> bool {
        let ranges: Vec<TextRange> = self
            .changes(side)
            .iter()
            .filter_map(|id| self.range(id, Version::Base))
            .collect();
        ranges
            .windows(2)
            .all(|pair| pair[0].start <= pair[1].start && pair[0].end <= pair[1].start)
    }
}

fn twin_side(side: Side) -> Version {
    side.other().into()
}

/// Read view of one change
#[derive(Clone, Copy)]
pub struct ChangeRef<'a> {
    list: &'a MergeList,
    id: ChangeId,
    change: &'a Change,
}

impl<'a> ChangeRef<'a> {
    pub fn id(&self) -> ChangeId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.change.side()
    }

    pub fn change_type(&self) -> ChangeType {
        self.change.change_type()
    }

    pub fn kind(&self) -> ChangeKind {
        self.change.change_type().kind
    }

    pub fn is_applied(&self) -> bool {
        self.change.change_type().applied
    }

    pub fn is_conflict(&self) -> bool {
        self.change.change_type().is_conflict()
    }

    /// The owning two-side change, if this is one of its halves
    pub fn two_side(&self) -> Option<TwoSideId> {
        self.change.parent()
    }

    /// The other half of a two-side change
    pub fn twin(&self) -> Option<ChangeId> {
        self.list.arena.twin(self.id)
    }

    /// The current range in one of the three documents
    pub fn range(&self, version: Version) -> Option<TextRange> {
        self.list.range(self.id, version)
    }

    /// The current text covered in one of the three documents
    pub fn text(&self, version: Version) -> Option<String> {
        let range = self.range(version)?;
        self.list.document(version).slice(range).ok()
    }
}

impl std::fmt::Debug for ChangeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeRef")
            .field("id", &self.id)
            .field("change", self.change)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_released_base_marker_makes_change_stale() {
        let mut merge =
            MergeList::from_texts("A\nB\nC\n", "A\nB\nC\n", "A\nZ\nC\n", &MergeConfig::default());
        let id = merge.right_changes.changes()[0];
        let base_range = merge
            .arena
            .change(id)
            .and_then(|change| merge.arena.base_range_id(change))
            .unwrap();

        // Gone without ever reaching the invalidation queue
        assert!(merge.base.release_range(base_range));
        assert!(!merge.is_valid(id));

        assert_eq!(merge.apply(id).unwrap(), ApplyOutcome::Stale);
        assert!(merge.right_changes.is_empty());
        assert_eq!(merge.result_text(), "A\nB\nC\n");
        assert_eq!(
            merge.take_events(),
            vec![MergeEvent::Removed {
                change: id,
                side: Side::Right,
                reason: RemovalReason::Invalidated,
            }]
        );
    }

    #[test]
    fn test_released_half_marker_dissolves_pair() {
        let mut merge =
            MergeList::from_texts("A\nX\nC\n", "A\nB\nC\n", "A\nY\nC\n", &MergeConfig::default());
        let left = merge.left_changes.changes()[0];
        let right = merge.right_changes.changes()[0];
        let left_range = merge.arena.change(left).map(Change::range_id).unwrap();

        assert!(merge.left.release_range(left_range));
        // A half is only valid while its twin is
        assert!(!merge.is_valid(left));
        assert!(!merge.is_valid(right));

        assert_eq!(merge.apply(right).unwrap(), ApplyOutcome::Stale);
        assert!(merge.left_changes.is_empty());
        assert!(merge.right_changes.is_empty());
        assert_eq!(merge.result_text(), "A\nB\nC\n");
    }
}
