use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::{fmt, num::ParseIntError, str::FromStr};

use log::debug;
use thiserror::Error;

use crate::content::Paragraph;

/// Store-unique highlight identifier, rendered as `hl-<n>`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HighlightId(u64);

impl HighlightId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HighlightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hl-{}", self.0)
    }
}

impl FromStr for HighlightId {
    type Err = ParseIntError;

    /// Accepts `hl-<n>` or a bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("hl-").unwrap_or(s).parse().map(Self)
    }
}

/// A marked byte range of one paragraph with a snapshot of the covered text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Highlight {
    pub id: HighlightId,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl Highlight {
    /// Whether the range still fits `text` (length and char boundaries).
    pub fn fits(&self, text: &str) -> bool {
        self.start < self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum HighlightError {
    #[error("highlight range is empty or reversed")]
    EmptyRange,
    #[error("highlight range ends past the paragraph text")]
    OutOfBounds,
    #[error("highlight range splits a character")]
    NotCharBoundary,
    #[error("highlight text does not match the paragraph range")]
    SnapshotMismatch,
    #[error("no paragraph at this index")]
    UnknownParagraph,
}

/// Highlight ranges per paragraph, in insertion order.
#[derive(Debug, Default)]
pub struct HighlightStore {
    by_paragraph: BTreeMap<usize, Vec<Highlight>>,
    next_id: u64,
}

impl HighlightStore {
    pub const fn new() -> Self {
        Self {
            by_paragraph: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Validate and append a highlight. Overlap with existing ranges is allowed.
    pub fn add(
        &mut self,
        paragraph: &Paragraph,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<HighlightId, HighlightError> {
        if start >= end {
            return Err(HighlightError::EmptyRange);
        }
        if end > paragraph.text.len() {
            return Err(HighlightError::OutOfBounds);
        }
        let Some(covered) = paragraph.text.get(start..end) else {
            return Err(HighlightError::NotCharBoundary);
        };
        if covered != text {
            return Err(HighlightError::SnapshotMismatch);
        }

        // Ids are never reused, even after removal.
        self.next_id += 1;
        let id = HighlightId(self.next_id);
        self.by_paragraph
            .entry(paragraph.index)
            .or_default()
            .push(Highlight {
                id,
                start,
                end,
                text: String::from(text),
            });
        debug!(
            "marks: highlight added id={} paragraph={} range={}..{}",
            id, paragraph.index, start, end
        );
        Ok(id)
    }

    /// Remove by id. Returns whether a highlight was removed.
    pub fn remove(&mut self, paragraph_index: usize, id: HighlightId) -> bool {
        let Some(list) = self.by_paragraph.get_mut(&paragraph_index) else {
            return false;
        };
        let before = list.len();
        list.retain(|highlight| highlight.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.by_paragraph.remove(&paragraph_index);
        }
        if removed {
            debug!(
                "marks: highlight removed id={} paragraph={}",
                id, paragraph_index
            );
        }
        removed
    }

    /// Highlights of one paragraph in insertion order.
    pub fn for_paragraph(&self, paragraph_index: usize) -> &[Highlight] {
        self.by_paragraph
            .get(&paragraph_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Highlights of one paragraph sorted by start (stable for equal starts).
    pub fn render_order(&self, paragraph_index: usize) -> Vec<&Highlight> {
        let mut sorted: Vec<&Highlight> = self.for_paragraph(paragraph_index).iter().collect();
        sorted.sort_by_key(|highlight| highlight.start);
        sorted
    }

    pub fn clear(&mut self) {
        self.by_paragraph.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.by_paragraph.is_empty()
    }
}
