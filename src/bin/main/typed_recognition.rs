use std::collections::VecDeque;

use readaloud_core::input::{RecognitionEngine, RecognitionEvent, StartError};

/// Recognizer fed from typed `say` lines instead of a microphone.
#[derive(Debug, Default)]
pub(super) struct TypedRecognition {
    listening: bool,
    events: VecDeque<RecognitionEvent>,
}

impl TypedRecognition {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Queue a phrase as a final result. Ignored while not listening.
    pub(super) fn say(&mut self, phrase: &str) -> bool {
        if !self.listening {
            return false;
        }
        self.events.push_back(RecognitionEvent::Result {
            transcript: phrase.to_owned(),
            is_final: true,
        });
        true
    }
}

impl RecognitionEngine for TypedRecognition {
    fn start(&mut self) -> Result<(), StartError> {
        if self.listening {
            return Err(StartError::AlreadyStarted);
        }
        self.listening = true;
        Ok(())
    }

    fn stop(&mut self) {
        if self.listening {
            self.listening = false;
            self.events.push_back(RecognitionEvent::SessionEnded);
        }
    }

    fn abort(&mut self) {
        self.listening = false;
        self.events.clear();
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        self.events.pop_front()
    }
}
