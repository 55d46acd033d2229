use text_document::DocumentId;

use crate::change::ChangeId;
use crate::side::Side;

/// The changes between the base and one version, in base order.
///
/// A change list references its documents by id; the documents themselves
/// are owned by the merge list.
#[derive(Debug, Clone)]
pub struct ChangeList {
    /// Which version this list compares against the base
    side: Side,

    /// The base document shared with the other list
    base_document: DocumentId,

    /// The version document this list alone refers to
    document: DocumentId,

    /// Entries sorted by base-range start
    changes: Vec<ChangeId>,
}

impl ChangeList {
    pub(crate) fn new(side: Side, base_document: DocumentId, document: DocumentId) -> Self {
        Self {
            side,
            base_document,
            document,
            changes: Vec::new(),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn base_document(&self) -> DocumentId {
        self.base_document
    }

    pub fn document(&self) -> DocumentId {
        self.document
    }

    /// The entries in ascending base order
    pub fn changes(&self) -> &[ChangeId] {
        &self.changes
    }

    pub fn iter(&self) -> impl Iterator<Item = ChangeId> + '_ {
        self.changes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn contains(&self, id: ChangeId) -> bool {
        self.changes.contains(&id)
    }

    /// Append a change; callers add changes in base order
    pub(crate) fn push(&mut self, id: ChangeId) {
        self.changes.push(id);
    }

    /// Detach a change, keeping the order of the rest
    pub(crate) fn remove(&mut self, id: ChangeId) -> bool {
        match self.changes.iter().position(|&entry| entry == id) {
            Some(index) => {
                self.changes.remove(index);
                true
            }
            None => false,
        }
    }
}
