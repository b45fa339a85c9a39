//! Speech synthesis capability boundary.

use alloc::{string::String, vec::Vec};

pub mod mock;

/// Engine-assigned handle for one submitted utterance.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct UtteranceId(pub u64);

/// A voice offered by the engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Voice {
    /// Stable identifier (the voice URI on web engines).
    pub id: String,
    pub display_name: String,
    pub language_tag: String,
}

/// Completion events reported by the engine for a submitted utterance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpeechEvent {
    Finished(UtteranceId),
    Failed(UtteranceId),
}

/// Exclusive speech output resource. At most one utterance plays at a time.
pub trait SpeechEngine {
    type Error;

    fn voices(&self) -> Vec<Voice>;

    /// Queue `text` for speech. `voice` of `None` selects the engine default.
    fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<UtteranceId, Self::Error>;

    /// Drop the current utterance and anything queued. Idempotent.
    fn cancel_all(&mut self);

    /// Next pending completion event, if any.
    fn poll_event(&mut self) -> Option<SpeechEvent>;
}

impl<T: SpeechEngine + ?Sized> SpeechEngine for &mut T {
    type Error = T::Error;

    fn voices(&self) -> Vec<Voice> {
        (**self).voices()
    }

    fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<UtteranceId, Self::Error> {
        (**self).speak(text, voice)
    }

    fn cancel_all(&mut self) {
        (**self).cancel_all()
    }

    fn poll_event(&mut self) -> Option<SpeechEvent> {
        (**self).poll_event()
    }
}

/// Pick the configured voice when the engine offers it, otherwise the default.
pub fn resolve_voice<'a>(voices: &[Voice], configured: &'a str) -> Option<&'a str> {
    if configured.is_empty() {
        return None;
    }
    voices
        .iter()
        .any(|voice| voice.id == configured)
        .then_some(configured)
}
