impl<SP, RC, ST> ReadingSession<SP, RC, ST>
where
    SP: SpeechEngine,
    RC: RecognitionEngine,
    ST: SettingsStore,
{
    /// Start a session with an empty document. Settings are loaded once here.
    pub fn new(speech: SP, recognizer: RC, store: ST, viewport: Viewport) -> Self {
        let settings = SettingsSync::load(store);
        let loupe = settings
            .current()
            .loupe_active
            .then(|| LoupeTracker::new(viewport));

        Self {
            speech,
            recognizer,
            settings,
            document: Document::empty(),
            highlights: HighlightStore::new(),
            annotations: AnnotationStore::new(),
            active: None,
            playback: PlaybackState::Idle,
            voice: VoiceControl::new(),
            viewport,
            loupe,
            notices: VecDeque::new(),
        }
    }

    /// Replace the document. Playback stops, focus clears and all marks of
    /// the previous document are dropped.
    pub fn load_document(&mut self, raw: &str) {
        self.update_playback(PlaybackEvent::Stop);
        self.document = Document::from_text(raw);
        self.active = None;
        self.highlights.clear();
        self.annotations.clear();
        info!("session: document loaded paragraphs={}", self.document.len());
    }

    /// Drain engine events and apply them. Call once per host loop turn.
    pub fn tick(&mut self) -> TickResult {
        let mut result = TickResult::NoRender;

        while let Some(event) = self.speech.poll_event() {
            self.handle_speech_event(event);
            result = TickResult::RenderRequested;
        }
        while let Some(event) = self.recognizer.poll_event() {
            self.handle_recognition_event(event);
            result = TickResult::RenderRequested;
        }

        result
    }

    /// Drain a polled input provider.
    pub fn process_inputs<IN: InputProvider>(&mut self, input: &mut IN) -> TickResult {
        let mut result = TickResult::NoRender;
        loop {
            match input.poll_event() {
                Ok(Some(event)) => {
                    self.apply_input(event);
                    result = TickResult::RenderRequested;
                }
                Ok(None) => break,
                Err(_) => {
                    warn!("input: provider error, skipping remaining events");
                    break;
                }
            }
        }
        result
    }

    pub fn apply_input(&mut self, event: InputEvent) {
        debug!("input: {:?}", event);
        match event {
            InputEvent::NextParagraph => self.next_paragraph(NavOrigin::Keyboard),
            InputEvent::PreviousParagraph => self.previous_paragraph(NavOrigin::Keyboard),
            InputEvent::SelectParagraph(index) => self.select_paragraph(index),
            InputEvent::SpeakCurrent => self.speak_current(),
            InputEvent::SpeakAll => self.speak_all(),
            InputEvent::Stop => self.stop(),
            InputEvent::ToggleVoiceControl => self.toggle_voice_control(),
        }
    }

    /// Highlight `start..end` of a paragraph; `text` must be the covered text.
    pub fn add_highlight(
        &mut self,
        paragraph: usize,
        start: usize,
        end: usize,
        text: &str,
    ) -> Result<HighlightId, HighlightError> {
        let target = self
            .document
            .get(paragraph)
            .ok_or(HighlightError::UnknownParagraph)?;
        self.highlights.add(target, start, end, text)
    }

    /// Highlight `start..end`, taking the covered text from the paragraph.
    pub fn highlight_range(
        &mut self,
        paragraph: usize,
        start: usize,
        end: usize,
    ) -> Result<HighlightId, HighlightError> {
        let target = self
            .document
            .get(paragraph)
            .ok_or(HighlightError::UnknownParagraph)?;
        if start >= end {
            return Err(HighlightError::EmptyRange);
        }
        let covered = target
            .text
            .get(start..end)
            .ok_or(if end > target.text.len() {
                HighlightError::OutOfBounds
            } else {
                HighlightError::NotCharBoundary
            })?;
        self.highlights.add(target, start, end, covered)
    }

    pub fn remove_highlight(&mut self, paragraph: usize, id: HighlightId) -> bool {
        self.highlights.remove(paragraph, id)
    }

    pub fn set_annotation(&mut self, paragraph: usize, text: &str) {
        self.annotations.set(paragraph, text);
    }

    pub fn annotation(&self, paragraph: usize) -> Option<&str> {
        self.annotations.get(paragraph)
    }

    /// Commit a settings change and persist it.
    pub fn update_setting(&mut self, update: SettingUpdate) -> bool {
        let changed = self.settings.commit(update);
        if changed {
            self.sync_loupe();
        }
        changed
    }

    pub fn settings(&self) -> &Settings {
        self.settings.current()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn highlights(&self) -> &HighlightStore {
        &self.highlights
    }

    pub fn active_paragraph(&self) -> Option<usize> {
        self.active
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn voice_control(&self) -> &VoiceControl {
        &self.voice
    }

    /// Voices offered by the speech engine, for a picker.
    pub fn voices(&self) -> Vec<Voice> {
        self.speech.voices()
    }

    pub fn speech(&self) -> &SP {
        &self.speech
    }

    pub fn speech_mut(&mut self) -> &mut SP {
        &mut self.speech
    }

    pub fn recognizer(&self) -> &RC {
        &self.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut RC {
        &mut self.recognizer
    }

    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        self.notices.drain(..).collect()
    }

    /// Track the pointer for the loupe. `None` while the loupe is off or
    /// nothing readable is under the cursor.
    pub fn pointer_moved<H: HitTester>(&mut self, hit: &H, cursor: Point) -> Option<&LoupeView> {
        self.loupe.as_mut()?.pointer_moved(hit, cursor)
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(loupe) = self.loupe.as_mut() {
            loupe.resize(viewport);
        }
    }

    pub fn loupe_view(&self) -> Option<&LoupeView> {
        self.loupe.as_ref()?.view()
    }

    /// Attach pointer tracking while the loupe is on, drop it when off.
    fn sync_loupe(&mut self) {
        let wanted = self.settings.current().loupe_active;
        match (wanted, self.loupe.is_some()) {
            (true, false) => {
                debug!("loupe: attached");
                self.loupe = Some(LoupeTracker::new(self.viewport));
            }
            (false, true) => {
                debug!("loupe: detached");
                self.loupe = None;
            }
            _ => {}
        }
    }
}
