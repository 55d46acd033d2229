use thiserror::Error;

use text_document::DocumentError;

/// Errors surfaced by merge list operations.
///
/// A diff that refuses its input is not an error here; the merge list
/// records it and stays empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// An edit or a range lookup was refused by one of the documents.
    #[error(transparent)]
    Document(#[from] DocumentError),
}
