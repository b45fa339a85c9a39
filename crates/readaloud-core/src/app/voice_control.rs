impl<SP, RC, ST> ReadingSession<SP, RC, ST>
where
    SP: SpeechEngine,
    RC: RecognitionEngine,
    ST: SettingsStore,
{
    pub fn toggle_voice_control(&mut self) {
        self.set_voice_control(!self.voice.is_active());
    }

    /// Switch continuous listening on or off.
    pub fn set_voice_control(&mut self, active: bool) {
        if active == self.voice.is_active() {
            return;
        }

        if !active {
            self.voice.set_active(false);
            self.recognizer.stop();
            info!("voice: listening stopped");
            return;
        }

        match self.recognizer.start() {
            Ok(()) | Err(StartError::AlreadyStarted) => {
                self.voice.set_active(true);
                info!("voice: listening started");
            }
            Err(StartError::Unavailable) => {
                warn!("voice: recognizer unavailable");
                self.notices
                    .push_back(SessionNotice::Alert(UserAlert::VoiceControlUnavailable));
            }
        }
    }

    pub fn handle_recognition_event(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Result {
                transcript,
                is_final,
            } => {
                if !is_final || !self.voice.is_active() {
                    return;
                }
                self.handle_transcript(&transcript);
            }
            RecognitionEvent::SessionEnded => {
                if !self.voice.is_active() {
                    debug!("voice: session ended");
                    return;
                }
                match self.recognizer.start() {
                    Ok(()) => debug!("voice: session ended, restarted"),
                    Err(StartError::AlreadyStarted) => {}
                    Err(StartError::Unavailable) => {
                        warn!("voice: restart failed, recognizer unavailable");
                        self.voice.set_active(false);
                        self.notices
                            .push_back(SessionNotice::Alert(UserAlert::VoiceControlUnavailable));
                    }
                }
            }
            RecognitionEvent::Error(code) => {
                if code.is_permission_denied() {
                    warn!("voice: permission denied code={:?}", code);
                    self.voice.set_active(false);
                    self.recognizer.abort();
                    self.notices
                        .push_back(SessionNotice::Alert(UserAlert::MicrophonePermissionDenied));
                } else {
                    warn!("voice: recognition error code={:?}", code);
                }
            }
        }
    }

    fn handle_transcript(&mut self, transcript: &str) {
        let phrase = normalize_transcript(transcript);
        self.voice.record(&phrase);

        let Some(command) = VoiceCommand::parse(&phrase) else {
            debug!("voice: no command in {:?}", phrase);
            return;
        };
        debug!("voice: {:?} from {:?}", command, phrase);

        match command {
            VoiceCommand::Next => self.next_paragraph(NavOrigin::Voice),
            VoiceCommand::Previous => self.previous_paragraph(NavOrigin::Voice),
            VoiceCommand::ReadAll => self.speak_all(),
            VoiceCommand::Stop => self.stop(),
            VoiceCommand::Magnifier(on) => {
                self.update_setting(SettingUpdate::Loupe(on));
            }
            VoiceCommand::FocusMode(on) => {
                self.update_setting(SettingUpdate::FocusMode(on));
            }
            VoiceCommand::Bionic(on) => {
                self.update_setting(SettingUpdate::BionicReading(on));
            }
        }
    }
}
