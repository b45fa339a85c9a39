impl<SP, RC, ST> ReadingSession<SP, RC, ST>
where
    SP: SpeechEngine,
    RC: RecognitionEngine,
    ST: SettingsStore,
{
    /// Speak the active paragraph once. No-op without an active paragraph.
    pub fn speak_current(&mut self) {
        self.update_playback(PlaybackEvent::SpeakCurrent);
    }

    /// Read from the active paragraph (or the first) to the end.
    pub fn speak_all(&mut self) {
        self.update_playback(PlaybackEvent::SpeakAll);
    }

    /// Cancel speech and go idle. Idempotent.
    pub fn stop(&mut self) {
        self.update_playback(PlaybackEvent::Stop);
    }

    pub fn handle_speech_event(&mut self, event: SpeechEvent) {
        match event {
            SpeechEvent::Finished(id) => self.update_playback(PlaybackEvent::Finished(id)),
            SpeechEvent::Failed(id) => self.update_playback(PlaybackEvent::Failed(id)),
        }
    }

    /// Single transition function for playback.
    fn update_playback(&mut self, event: PlaybackEvent) {
        let next = match event {
            PlaybackEvent::SpeakCurrent => {
                let Some(paragraph) = self.active else {
                    debug!("playback: speak ignored, no active paragraph");
                    return;
                };
                match self.submit_utterance(paragraph) {
                    Some(utterance) => PlaybackState::SpeakingSingle {
                        paragraph,
                        utterance,
                    },
                    None => PlaybackState::Idle,
                }
            }
            PlaybackEvent::SpeakAll => {
                if self.document.is_empty() {
                    debug!("playback: read all ignored, document is empty");
                    return;
                }
                let paragraph = match self.active {
                    Some(paragraph) => paragraph,
                    None => {
                        self.move_active(0, NavOrigin::Playback);
                        0
                    }
                };
                match self.submit_utterance(paragraph) {
                    Some(utterance) => PlaybackState::SpeakingContinuous {
                        paragraph,
                        utterance,
                        advance: AdvanceMode::Started,
                    },
                    None => PlaybackState::Idle,
                }
            }
            PlaybackEvent::Finished(id) => {
                if self.playback.utterance() != Some(id) {
                    debug!("playback: stale completion ignored utterance={:?}", id);
                    return;
                }
                match self.playback {
                    PlaybackState::SpeakingContinuous { paragraph, .. }
                        if paragraph + 1 < self.document.len() =>
                    {
                        let next = paragraph + 1;
                        self.move_active(next, NavOrigin::Playback);
                        match self.submit_utterance(next) {
                            Some(utterance) => PlaybackState::SpeakingContinuous {
                                paragraph: next,
                                utterance,
                                advance: AdvanceMode::AutoAdvanced,
                            },
                            None => PlaybackState::Idle,
                        }
                    }
                    _ => PlaybackState::Idle,
                }
            }
            PlaybackEvent::Failed(id) => {
                if self.playback.utterance() != Some(id) {
                    debug!("playback: stale error ignored utterance={:?}", id);
                    return;
                }
                warn!("playback: engine reported an error utterance={:?}", id);
                PlaybackState::Idle
            }
            PlaybackEvent::Stop => {
                self.speech.cancel_all();
                PlaybackState::Idle
            }
        };

        if next != self.playback {
            debug!(
                "playback: {} -> {} paragraph={:?}",
                self.playback.label(),
                next.label(),
                next.paragraph()
            );
        }
        self.playback = next;
    }

    /// Cancel whatever is playing and submit one paragraph. `None` when the
    /// engine refuses the utterance.
    fn submit_utterance(&mut self, paragraph: usize) -> Option<UtteranceId> {
        let target = self.document.get(paragraph)?;

        self.speech.cancel_all();
        let voices = self.speech.voices();
        let voice = resolve_voice(&voices, &self.settings.current().speech_voice);
        if voice.is_none() && !self.settings.current().speech_voice.is_empty() {
            debug!("playback: configured voice unavailable, using engine default");
        }

        match self.speech.speak(&target.text, voice) {
            Ok(utterance) => Some(utterance),
            Err(_) => {
                warn!("playback: speech engine rejected paragraph={}", paragraph);
                None
            }
        }
    }
}
