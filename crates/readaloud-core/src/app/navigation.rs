impl<SP, RC, ST> ReadingSession<SP, RC, ST>
where
    SP: SpeechEngine,
    RC: RecognitionEngine,
    ST: SettingsStore,
{
    /// Pointer click on a paragraph.
    pub fn select_paragraph(&mut self, index: usize) {
        self.move_active(index, NavOrigin::Pointer);
    }

    /// Step forward, starting at the first paragraph when nothing is active.
    pub fn next_paragraph(&mut self, origin: NavOrigin) {
        let Some(last) = self.document.last_index() else {
            return;
        };
        let target = self.active.map_or(0, |current| (current + 1).min(last));
        self.move_active(target, origin);
    }

    /// Step back, clamped at the first paragraph.
    pub fn previous_paragraph(&mut self, origin: NavOrigin) {
        if self.document.is_empty() {
            return;
        }
        let target = self.active.map_or(0, |current| current.saturating_sub(1));
        self.move_active(target, origin);
    }

    /// Move focus. Manual moves stop playback before the new index is set;
    /// every origin but a pointer click asks the host to scroll.
    fn move_active(&mut self, index: usize, origin: NavOrigin) -> bool {
        if index >= self.document.len() {
            debug!(
                "nav: index out of range index={} paragraphs={}",
                index,
                self.document.len()
            );
            return false;
        }

        let changed = self.active != Some(index);
        if changed {
            if origin.is_manual() && self.playback.is_speaking() {
                debug!("nav: manual move interrupts playback origin={:?}", origin);
                self.update_playback(PlaybackEvent::Stop);
            }
            debug!(
                "nav: active {:?} -> {} origin={:?}",
                self.active, index, origin
            );
            self.active = Some(index);
        }

        if origin.scrolls() {
            self.notices.push_back(SessionNotice::ScrollIntoView(index));
        }
        changed
    }
}
