use std::{fs, io, path::PathBuf};

use readaloud_core::content::DocumentSource;

/// Plain UTF-8 text file. Other formats are decoded before they reach us.
#[derive(Debug)]
pub(super) struct TextFile {
    path: PathBuf,
}

impl TextFile {
    pub(super) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DocumentSource for TextFile {
    type Error = io::Error;

    fn load_text(&mut self) -> Result<String, Self::Error> {
        fs::read_to_string(&self.path)
    }
}
