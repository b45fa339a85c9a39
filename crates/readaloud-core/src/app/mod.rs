//! Reading session state machine: navigation focus, speech playback, voice
//! control, marks and the loupe for one loaded document.

use alloc::{collections::VecDeque, vec::Vec};

use log::{debug, info, warn};

use crate::{
    content::Document,
    input::{InputEvent, InputProvider, RecognitionEngine, RecognitionEvent, StartError},
    loupe::{HitTester, LoupeTracker, LoupeView, Point, Viewport},
    marks::{AnnotationStore, HighlightError, HighlightId, HighlightStore},
    render::{ParagraphView, render_runs},
    settings::{SettingUpdate, Settings, SettingsStore, SettingsSync},
    speech::{SpeechEngine, SpeechEvent, UtteranceId, Voice, resolve_voice},
    voice::{VoiceCommand, VoiceControl, normalize_transcript},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// How the current continuous utterance was reached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdvanceMode {
    /// Started by the user.
    Started,
    /// Reached by auto-advance after the previous paragraph finished.
    AutoAdvanced,
}

/// Speech playback state. The utterance id ties engine events to the state
/// that submitted them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackState {
    Idle,
    SpeakingSingle {
        paragraph: usize,
        utterance: UtteranceId,
    },
    SpeakingContinuous {
        paragraph: usize,
        utterance: UtteranceId,
        advance: AdvanceMode,
    },
}

impl PlaybackState {
    pub const fn is_speaking(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Paragraph being voiced.
    pub const fn paragraph(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::SpeakingSingle { paragraph, .. } | Self::SpeakingContinuous { paragraph, .. } => {
                Some(paragraph)
            }
        }
    }

    const fn utterance(self) -> Option<UtteranceId> {
        match self {
            Self::Idle => None,
            Self::SpeakingSingle { utterance, .. } | Self::SpeakingContinuous { utterance, .. } => {
                Some(utterance)
            }
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::SpeakingSingle { .. } => "SpeakingSingle",
            Self::SpeakingContinuous { .. } => "SpeakingContinuous",
        }
    }
}

/// Who moved the active paragraph. Everything but `Playback` is manual and
/// interrupts speech.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavOrigin {
    Pointer,
    Keyboard,
    Voice,
    Playback,
}

impl NavOrigin {
    const fn is_manual(self) -> bool {
        !matches!(self, Self::Playback)
    }

    const fn scrolls(self) -> bool {
        !matches!(self, Self::Pointer)
    }
}

/// Problems the host must show to the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UserAlert {
    MicrophonePermissionDenied,
    VoiceControlUnavailable,
}

impl UserAlert {
    pub const fn message(self) -> &'static str {
        match self {
            Self::MicrophonePermissionDenied => {
                "Microphone access was denied. Allow it to use voice commands."
            }
            Self::VoiceControlUnavailable => "Speech recognition is not available.",
        }
    }
}

/// Effects queued for the host, drained with [`ReadingSession::take_notices`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionNotice {
    ScrollIntoView(usize),
    Alert(UserAlert),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PlaybackEvent {
    SpeakCurrent,
    SpeakAll,
    Finished(UtteranceId),
    Failed(UtteranceId),
    Stop,
}

pub struct ReadingSession<SP, RC, ST>
where
    SP: SpeechEngine,
    RC: RecognitionEngine,
    ST: SettingsStore,
{
    speech: SP,
    recognizer: RC,
    settings: SettingsSync<ST>,
    document: Document,
    highlights: HighlightStore,
    annotations: AnnotationStore,
    active: Option<usize>,
    playback: PlaybackState,
    voice: VoiceControl,
    viewport: Viewport,
    loupe: Option<LoupeTracker>,
    notices: VecDeque<SessionNotice>,
}

include!("session.rs");
include!("playback.rs");
include!("navigation.rs");
include!("voice_control.rs");
include!("view.rs");

impl<SP, RC, ST> Drop for ReadingSession<SP, RC, ST>
where
    SP: SpeechEngine,
    RC: RecognitionEngine,
    ST: SettingsStore,
{
    fn drop(&mut self) {
        self.speech.cancel_all();
        self.recognizer.abort();
        self.settings.flush();
    }
}

#[cfg(test)]
mod tests;
