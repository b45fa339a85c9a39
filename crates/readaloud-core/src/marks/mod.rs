//! Session-scoped user marks: highlight ranges and notes, keyed by paragraph.

mod annotations;
mod highlights;

pub use annotations::AnnotationStore;
pub use highlights::{Highlight, HighlightError, HighlightId, HighlightStore};
