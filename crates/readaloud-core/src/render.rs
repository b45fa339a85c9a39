//! Paragraph view models: styled text runs composed from raw text, highlight
//! ranges and bionic emphasis.

use alloc::vec::Vec;

use crate::{
    marks::{Highlight, HighlightId},
    text_policy::{BionicSegment, bionic_segments},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Emphasis {
    Regular,
    /// Leading part of a word under bionic reading.
    Fixation,
    /// Remainder of a word under bionic reading.
    Faded,
}

/// A contiguous slice of paragraph text with one style.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    /// Set when the run lies inside a rendered highlight.
    pub highlight: Option<HighlightId>,
    pub emphasis: Emphasis,
}

/// Everything a renderer needs to draw one paragraph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParagraphView<'a> {
    pub index: usize,
    pub runs: Vec<TextRun<'a>>,
    pub active: bool,
    /// Focus mode fades every paragraph except the active one.
    pub dimmed: bool,
    pub speaking: bool,
    pub has_note: bool,
}

/// Compose `text` and its highlights into ordered runs.
///
/// `highlights` must already be sorted by start. A highlight starting before
/// the end of the previously emitted one is dropped whole, as is any range
/// that no longer fits the text.
pub fn render_runs<'a>(text: &'a str, highlights: &[&Highlight], bionic: bool) -> Vec<TextRun<'a>> {
    let mut runs = Vec::new();
    let mut last_index = 0usize;

    for highlight in highlights {
        if highlight.start < last_index || !highlight.fits(text) {
            continue;
        }

        push_run(&mut runs, &text[last_index..highlight.start], None, bionic);
        push_run(
            &mut runs,
            &text[highlight.start..highlight.end],
            Some(highlight.id),
            bionic,
        );
        last_index = highlight.end;
    }

    push_run(&mut runs, &text[last_index..], None, bionic);
    runs
}

fn push_run<'a>(
    runs: &mut Vec<TextRun<'a>>,
    text: &'a str,
    highlight: Option<HighlightId>,
    bionic: bool,
) {
    if text.is_empty() {
        return;
    }

    if !bionic {
        runs.push(TextRun {
            text,
            highlight,
            emphasis: Emphasis::Regular,
        });
        return;
    }

    for segment in bionic_segments(text) {
        let emphasis = match segment {
            BionicSegment::Space(_) => Emphasis::Regular,
            BionicSegment::Bold(_) => Emphasis::Fixation,
            BionicSegment::Rest(_) => Emphasis::Faded,
        };
        let text = segment.text();
        if text.is_empty() {
            continue;
        }
        runs.push(TextRun {
            text,
            highlight,
            emphasis,
        });
    }
}

/// Pixels to scroll after `elapsed_ms` at `speed` px/s. Speed 0 is off.
pub fn auto_scroll_offset(speed: u16, elapsed_ms: u64) -> u64 {
    u64::from(speed).saturating_mul(elapsed_ms) / 1_000
}
