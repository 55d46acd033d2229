//! Mutable text documents with live range markers.
//!
//! A [`Document`] owns its text as a rope and a set of markers. Markers follow
//! edits made elsewhere in the document and become permanently invalid when an
//! edit crosses one of their boundaries. Invalidated markers are queued rather
//! than reported through callbacks, so no user code runs in the middle of an
//! edit; owners drain the queue with [`Document::take_invalidated`].

mod document;
mod error;
mod marker;

pub use buffer_diff::TextRange;
pub use document::{Document, DocumentId, RangeId};
pub use error::DocumentError;
pub use marker::{adjust_range, Edit};
