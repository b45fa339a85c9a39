//! Document content: the ordered paragraph list derived from raw text.

use alloc::{string::String, vec::Vec};

use log::debug;

/// One retained, non-blank line of the loaded document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Paragraph {
    pub index: usize,
    pub text: String,
}

/// Immutable paragraph list for one document load.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

impl Document {
    pub const fn empty() -> Self {
        Self {
            paragraphs: Vec::new(),
        }
    }

    /// Segment raw text into paragraphs.
    pub fn from_text(raw: &str) -> Self {
        let paragraphs = segment_paragraphs(raw);
        debug!(
            "content: segmented bytes={} paragraphs={}",
            raw.len(),
            paragraphs.len()
        );
        Self { paragraphs }
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Index of the last paragraph, `None` for an empty document.
    pub fn last_index(&self) -> Option<usize> {
        self.paragraphs.len().checked_sub(1)
    }
}

/// Split on line breaks, keep lines with visible content, re-index from 0.
///
/// Retained lines are not trimmed. A trailing `\r` from CRLF input is a line
/// break, not content, and is dropped.
pub fn segment_paragraphs(raw: &str) -> Vec<Paragraph> {
    raw.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| Paragraph {
            index,
            text: String::from(line),
        })
        .collect()
}

/// Source of raw document text, one string per load.
pub trait DocumentSource {
    type Error;

    fn load_text(&mut self) -> Result<String, Self::Error>;
}
