use alloc::{collections::VecDeque, string::String};
use core::convert::Infallible;

use super::{
    InputEvent, InputProvider, RecognitionEngine, RecognitionErrorCode, RecognitionEvent,
    StartError,
};

/// Input source that replays a fixed event list.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }
}

impl InputProvider for ScriptedInput {
    type Error = Infallible;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.events.pop_front())
    }
}

/// Recognizer whose lifecycle calls are counted and whose events are injected.
#[derive(Debug, Default)]
pub struct ScriptedRecognition {
    running: bool,
    unavailable: bool,
    starts: usize,
    stops: usize,
    aborts: usize,
    events: VecDeque<RecognitionEvent>,
}

impl ScriptedRecognition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recognizer that refuses every start.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Make later starts fail, as when the platform revokes the service.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn starts(&self) -> usize {
        self.starts
    }

    pub fn stops(&self) -> usize {
        self.stops
    }

    pub fn aborts(&self) -> usize {
        self.aborts
    }

    pub fn hear(&mut self, transcript: &str) {
        self.events.push_back(RecognitionEvent::Result {
            transcript: String::from(transcript),
            is_final: true,
        });
    }

    pub fn hear_interim(&mut self, transcript: &str) {
        self.events.push_back(RecognitionEvent::Result {
            transcript: String::from(transcript),
            is_final: false,
        });
    }

    /// Engine-initiated end of the listening session.
    pub fn end_session(&mut self) {
        self.running = false;
        self.events.push_back(RecognitionEvent::SessionEnded);
    }

    pub fn fail(&mut self, code: RecognitionErrorCode) {
        self.events.push_back(RecognitionEvent::Error(code));
    }
}

impl RecognitionEngine for ScriptedRecognition {
    fn start(&mut self) -> Result<(), StartError> {
        if self.unavailable {
            return Err(StartError::Unavailable);
        }
        if self.running {
            return Err(StartError::AlreadyStarted);
        }
        self.starts += 1;
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.running = false;
    }

    fn abort(&mut self) {
        self.aborts += 1;
        self.running = false;
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.events.pop_front()
    }
}
