use std::{collections::VecDeque, convert::Infallible};

use log::debug;
use readaloud_core::speech::{SpeechEngine, SpeechEvent, UtteranceId, Voice};

/// Speech engine that prints utterances and completes each on the next poll.
#[derive(Debug, Default)]
pub(super) struct ConsoleSpeech {
    next_id: u64,
    current: Option<UtteranceId>,
    events: VecDeque<SpeechEvent>,
}

impl ConsoleSpeech {
    pub(super) fn new() -> Self {
        Self::default()
    }
}

impl SpeechEngine for ConsoleSpeech {
    type Error = Infallible;

    fn voices(&self) -> Vec<Voice> {
        vec![
            Voice {
                id: "console-en".into(),
                display_name: "Console (English)".into(),
                language_tag: "en-US".into(),
            },
            Voice {
                id: "console-es".into(),
                display_name: "Console (Spanish)".into(),
                language_tag: "es-ES".into(),
            },
        ]
    }

    fn speak(&mut self, text: &str, voice: Option<&str>) -> Result<UtteranceId, Self::Error> {
        self.next_id += 1;
        let id = UtteranceId(self.next_id);
        println!("  speaking #{} [{}]: {}", id.0, voice.unwrap_or("default"), text.trim());
        self.current = Some(id);
        Ok(id)
    }

    fn cancel_all(&mut self) {
        if let Some(id) = self.current.take() {
            debug!("console-speech: cancelled #{}", id.0);
        }
    }

    fn poll_event(&mut self) -> Option<SpeechEvent> {
        if let Some(id) = self.current.take() {
            self.events.push_back(SpeechEvent::Finished(id));
        }
        self.events.pop_front()
    }
}
