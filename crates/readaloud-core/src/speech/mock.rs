use alloc::{collections::VecDeque, string::String, vec::Vec};
use core::convert::Infallible;

use super::{SpeechEngine, SpeechEvent, UtteranceId, Voice};

/// One `speak` call as seen by [`ScriptedSpeech`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpokenUtterance {
    pub id: UtteranceId,
    pub text: String,
    pub voice: Option<String>,
}

/// Speech engine that records calls; completions are injected by the caller.
#[derive(Debug, Default)]
pub struct ScriptedSpeech {
    voices: Vec<Voice>,
    next_id: u64,
    spoken: Vec<SpokenUtterance>,
    current: Option<UtteranceId>,
    cancel_count: usize,
    events: VecDeque<SpeechEvent>,
}

impl ScriptedSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            ..Self::default()
        }
    }

    pub fn spoken(&self) -> &[SpokenUtterance] {
        &self.spoken
    }

    /// Utterance currently playing, cleared by cancel and completion.
    pub fn current(&self) -> Option<UtteranceId> {
        self.current
    }

    pub fn cancel_count(&self) -> usize {
        self.cancel_count
    }

    /// Complete the playing utterance successfully.
    pub fn finish_current(&mut self) -> Option<UtteranceId> {
        let id = self.current.take()?;
        self.events.push_back(SpeechEvent::Finished(id));
        Some(id)
    }

    /// Fail the playing utterance.
    pub fn fail_current(&mut self) -> Option<UtteranceId> {
        let id = self.current.take()?;
        self.events.push_back(SpeechEvent::Failed(id));
        Some(id)
    }

    /// Queue an arbitrary event, e.g. a late completion for a stale utterance.
    pub fn push_event(&mut self, event: SpeechEvent) {
        self.events.push_back(event);
    }
}

impl SpeechEngine for ScriptedSpeech {
    type Error = Infallible;

    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<UtteranceId, Self::Error> {
        self.next_id += 1;
        let id = UtteranceId(self.next_id);
        self.spoken.push(SpokenUtterance {
            id,
            text: String::from(text),
            voice: voice.map(String::from),
        });
        self.current = Some(id);
        Ok(id)
    }

    fn cancel_all(&mut self) {
        self.cancel_count += 1;
        self.current = None;
    }

    fn poll_event(&mut self) -> Option<SpeechEvent> {
        self.events.pop_front()
    }
}
