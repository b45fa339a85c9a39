use alloc::{collections::BTreeMap, string::String};

use log::debug;

/// At most one free-form note per paragraph.
///
/// An empty note is stored as an entry, but [`AnnotationStore::has_note`]
/// reports it as absent so the note indicator stays hidden.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    notes: BTreeMap<usize, String>,
}

impl AnnotationStore {
    pub const fn new() -> Self {
        Self {
            notes: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, paragraph_index: usize, text: &str) {
        debug!(
            "marks: note set paragraph={} chars={}",
            paragraph_index,
            text.chars().count()
        );
        self.notes.insert(paragraph_index, String::from(text));
    }

    pub fn get(&self, paragraph_index: usize) -> Option<&str> {
        self.notes.get(&paragraph_index).map(String::as_str)
    }

    pub fn has_note(&self, paragraph_index: usize) -> bool {
        self.get(paragraph_index).is_some_and(|note| !note.is_empty())
    }

    pub fn remove(&mut self, paragraph_index: usize) -> Option<String> {
        self.notes.remove(&paragraph_index)
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }
}
