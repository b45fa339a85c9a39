impl<SP, RC, ST> ReadingSession<SP, RC, ST>
where
    SP: SpeechEngine,
    RC: RecognitionEngine,
    ST: SettingsStore,
{
    /// Styled view of one paragraph with the current marks and settings.
    pub fn paragraph_view(&self, index: usize) -> Option<ParagraphView<'_>> {
        let paragraph = self.document.get(index)?;
        let settings = self.settings.current();
        let active = self.active == Some(index);

        Some(ParagraphView {
            index,
            runs: render_runs(
                &paragraph.text,
                &self.highlights.render_order(index),
                settings.bionic_reading,
            ),
            active,
            dimmed: settings.focus_mode && self.active.is_some() && !active,
            speaking: self.playback.paragraph() == Some(index),
            has_note: self.annotations.has_note(index),
        })
    }

    pub fn paragraph_views(&self) -> Vec<ParagraphView<'_>> {
        (0..self.document.len())
            .filter_map(|index| self.paragraph_view(index))
            .collect()
    }
}
