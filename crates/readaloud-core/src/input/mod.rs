//! Input abstraction layer: logical user actions and speech recognition.

use alloc::string::String;

use thiserror::Error;

pub mod mock;

/// Logical actions consumed by the reading session. Keyboard and pointer
/// bindings are resolved by the host before they reach the core.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    NextParagraph,
    PreviousParagraph,
    /// Pointer click on a paragraph.
    SelectParagraph(usize),
    SpeakCurrent,
    SpeakAll,
    Stop,
    ToggleVoiceControl,
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}

/// Recognition error codes reported by the engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecognitionErrorCode {
    /// Microphone permission denied by the user.
    NotAllowed,
    /// Recognition service refused by platform policy.
    ServiceNotAllowed,
    NoSpeech,
    AudioCapture,
    Network,
    Aborted,
    Other(String),
}

impl RecognitionErrorCode {
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::NotAllowed | Self::ServiceNotAllowed)
    }
}

/// Typed events emitted by a running recognizer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecognitionEvent {
    Result { transcript: String, is_final: bool },
    SessionEnded,
    Error(RecognitionErrorCode),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum StartError {
    #[error("recognizer is already started")]
    AlreadyStarted,
    #[error("speech recognition is unavailable")]
    Unavailable,
}

/// Continuous speech recognizer.
///
/// Started when voice control is switched on, stopped when switched off and
/// aborted when the session ends.
pub trait RecognitionEngine {
    fn start(&mut self) -> Result<(), StartError>;
    fn stop(&mut self);
    fn abort(&mut self);
    fn poll_event(&mut self) -> Option<RecognitionEvent>;
}

impl<T: RecognitionEngine + ?Sized> RecognitionEngine for &mut T {
    fn start(&mut self) -> Result<(), StartError> {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn abort(&mut self) {
        (**self).abort()
    }

    fn poll_event(&mut self) -> Option<RecognitionEvent> {
        (**self).poll_event()
    }
}
