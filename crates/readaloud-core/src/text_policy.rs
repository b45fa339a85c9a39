//! Shared text shaping policies: bionic emphasis, word characters and compact
//! labels.

use heapless::String as BoundedString;

/// Longest label shown for a non-text element, in chars.
pub const LABEL_MAX_CHARS: usize = 50;
/// Byte capacity of a truncated label (max chars of 4 bytes plus the ellipsis).
pub const LABEL_BYTES: usize = LABEL_MAX_CHARS * 4 + ELLIPSIS.len();
const ELLIPSIS: &str = "...";

/// One piece of a bionic-transformed string.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BionicSegment<'a> {
    /// Whitespace run, passed through untouched.
    Space(&'a str),
    /// Leading part of a word, rendered emphasized.
    Bold(&'a str),
    /// Remainder of a word, rendered de-emphasized. May be empty.
    Rest(&'a str),
}

impl<'a> BionicSegment<'a> {
    pub const fn text(self) -> &'a str {
        match self {
            Self::Space(text) | Self::Bold(text) | Self::Rest(text) => text,
        }
    }
}

/// Number of leading chars to emphasize in a word of `len` chars.
pub const fn bold_len(len: usize) -> usize {
    match len {
        0 => 0,
        1..=3 => 1,
        4..=5 => 2,
        // ceil(0.4 * len)
        _ => (2 * len).div_ceil(5),
    }
}

/// Split `text` into whitespace runs and emphasized word prefixes/suffixes.
///
/// Every word yields exactly one `Bold` followed by one `Rest` segment;
/// concatenating all segments reproduces `text`.
pub fn bionic_segments(text: &str) -> BionicSegments<'_> {
    BionicSegments {
        rest: text,
        pending_rest: None,
    }
}

pub struct BionicSegments<'a> {
    rest: &'a str,
    pending_rest: Option<&'a str>,
}

impl<'a> Iterator for BionicSegments<'a> {
    type Item = BionicSegment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tail) = self.pending_rest.take() {
            return Some(BionicSegment::Rest(tail));
        }

        let first = self.rest.chars().next()?;
        let in_space = first.is_whitespace();
        let run_end = self
            .rest
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace() != in_space)
            .map_or(self.rest.len(), |(idx, _)| idx);

        let (run, rest) = self.rest.split_at(run_end);
        self.rest = rest;

        if in_space {
            return Some(BionicSegment::Space(run));
        }

        let bold = bold_len(run.chars().count());
        let split = run
            .char_indices()
            .nth(bold)
            .map_or(run.len(), |(idx, _)| idx);
        let (head, tail) = run.split_at(split);
        self.pending_rest = Some(tail);
        Some(BionicSegment::Bold(head))
    }
}

/// Word characters for cursor extraction: ASCII alphanumerics and `_`,
/// Latin-1 supplement letters and CJK unified ideographs.
pub fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
        || ch == '_'
        || (matches!(ch, '\u{00C0}'..='\u{00FF}') && ch != '\u{00D7}' && ch != '\u{00F7}')
        || matches!(ch, '\u{4E00}'..='\u{9FFF}')
}

/// Trim and cap a label at [`LABEL_MAX_CHARS`], appending `...` when cut.
pub fn truncate_label(source: &str) -> BoundedString<LABEL_BYTES> {
    let mut out = BoundedString::new();
    let source = source.trim();

    for (count, ch) in source.chars().enumerate() {
        if count >= LABEL_MAX_CHARS {
            let _ = out.push_str(ELLIPSIS);
            break;
        }
        // Capacity covers the worst case, pushes cannot fail here.
        let _ = out.push(ch);
    }

    out
}
