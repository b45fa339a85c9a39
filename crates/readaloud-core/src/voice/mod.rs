//! Voice command interpreter and voice-control state.

use alloc::string::String;

use heapless::String as BoundedString;

/// Bytes of the last transcript kept for display.
pub const TRANSCRIPT_BYTES: usize = 160;

/// Action requested by a recognized phrase.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VoiceCommand {
    Next,
    Previous,
    ReadAll,
    Stop,
    Magnifier(bool),
    FocusMode(bool),
    Bionic(bool),
}

impl VoiceCommand {
    /// Match a transcript by substring, first rule wins.
    pub fn parse(transcript: &str) -> Option<Self> {
        let phrase = normalize_transcript(transcript);
        let has = |needle: &str| phrase.contains(needle);

        if has("next") {
            Some(Self::Next)
        } else if has("previous") || has("back") {
            Some(Self::Previous)
        } else if has("read all") || has("start reading") {
            Some(Self::ReadAll)
        } else if has("stop") || has("pause") {
            Some(Self::Stop)
        } else if has("magnifier on") {
            Some(Self::Magnifier(true))
        } else if has("magnifier off") {
            Some(Self::Magnifier(false))
        } else if has("focus mode on") || has("focus on") {
            Some(Self::FocusMode(true))
        } else if has("focus mode off") || has("focus off") {
            Some(Self::FocusMode(false))
        } else if has("bionic on") || has("bionic reading on") {
            Some(Self::Bionic(true))
        } else if has("bionic off") || has("bionic reading off") {
            Some(Self::Bionic(false))
        } else {
            None
        }
    }
}

/// Lowercased, trimmed transcript.
pub fn normalize_transcript(transcript: &str) -> String {
    transcript.trim().to_lowercase()
}

/// Voice control toggle plus the last heard phrase. Independent of playback.
#[derive(Debug, Default)]
pub struct VoiceControl {
    active: bool,
    last_transcript: BoundedString<TRANSCRIPT_BYTES>,
}

impl VoiceControl {
    pub const fn new() -> Self {
        Self {
            active: false,
            last_transcript: BoundedString::new(),
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn last_transcript(&self) -> &str {
        &self.last_transcript
    }

    /// Keep a display copy of `transcript`, cut at a char boundary.
    pub fn record(&mut self, transcript: &str) {
        self.last_transcript.clear();
        for ch in transcript.chars() {
            if self.last_transcript.push(ch).is_err() {
                break;
            }
        }
    }
}
