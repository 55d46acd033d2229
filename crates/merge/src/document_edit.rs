use buffer_diff::TextRange;
use ropey::Rope;
use text_document::{Document, DocumentError, DocumentId};

/// Edit access to one of a merge list's documents.
///
/// Text can be read and changed, but the markers the merge list owns stay out
/// of reach; their invalidations are handled once the edit is over.
pub struct DocumentEdit<'a> {
    document: &'a mut Document,
}

impl<'a> DocumentEdit<'a> {
    pub(crate) fn new(document: &'a mut Document) -> Self {
        Self { document }
    }

    pub fn id(&self) -> DocumentId {
        self.document.id()
    }

    pub fn text(&self) -> &Rope {
        self.document.text()
    }

    pub fn contents(&self) -> String {
        self.document.contents()
    }

    pub fn len_chars(&self) -> usize {
        self.document.len_chars()
    }

    pub fn modification_stamp(&self) -> u64 {
        self.document.modification_stamp()
    }

    pub fn slice(&self, range: TextRange) -> Result<String, DocumentError> {
        self.document.slice(range)
    }

    /// Replace the chars in `range` with `text`
    pub fn replace(&mut self, range: TextRange, text: &str) -> Result<(), DocumentError> {
        self.document.replace(range, text)
    }

    /// Insert text at a char offset
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), DocumentError> {
        self.document.insert(offset, text)
    }

    /// Delete the chars in `range`
    pub fn delete(&mut self, range: TextRange) -> Result<(), DocumentError> {
        self.document.delete(range)
    }
}
