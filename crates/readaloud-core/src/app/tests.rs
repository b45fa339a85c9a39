use super::*;
use crate::{
    input::{
        RecognitionErrorCode,
        mock::{ScriptedInput, ScriptedRecognition},
    },
    loupe::{CaretHit, ElementHit},
    settings::MemorySettingsStore,
    speech::mock::ScriptedSpeech,
};

type TestSession = ReadingSession<ScriptedSpeech, ScriptedRecognition, MemorySettingsStore>;

const THREE: &str = "First paragraph.\n\nSecond one.\nThird and last.";
const VIEWPORT: Viewport = Viewport::new(1024.0, 768.0);

fn session(text: &str) -> TestSession {
    let mut session = ReadingSession::new(
        ScriptedSpeech::new(),
        ScriptedRecognition::new(),
        MemorySettingsStore::default(),
        VIEWPORT,
    );
    session.load_document(text);
    session
}

fn finish_current(session: &mut TestSession) {
    assert!(session.speech_mut().finish_current().is_some());
    session.tick();
}

fn hear(session: &mut TestSession, transcript: &str) {
    session.recognizer_mut().hear(transcript);
    session.tick();
}

fn spoken_texts(session: &TestSession) -> Vec<String> {
    session
        .speech()
        .spoken()
        .iter()
        .map(|utterance| utterance.text.clone())
        .collect()
}

fn scrolls(notices: &[SessionNotice]) -> Vec<usize> {
    notices
        .iter()
        .filter_map(|notice| match notice {
            SessionNotice::ScrollIntoView(index) => Some(*index),
            SessionNotice::Alert(_) => None,
        })
        .collect()
}

#[test]
fn continuous_reading_advances_and_ends_idle() {
    let mut session = session(THREE);

    session.speak_all();
    assert_eq!(session.active_paragraph(), Some(0));
    assert!(matches!(
        session.playback(),
        PlaybackState::SpeakingContinuous {
            paragraph: 0,
            advance: AdvanceMode::Started,
            ..
        }
    ));
    assert_eq!(scrolls(&session.take_notices()), [0]);

    finish_current(&mut session);
    assert_eq!(session.active_paragraph(), Some(1));
    assert!(matches!(
        session.playback(),
        PlaybackState::SpeakingContinuous {
            paragraph: 1,
            advance: AdvanceMode::AutoAdvanced,
            ..
        }
    ));
    assert_eq!(scrolls(&session.take_notices()), [1]);

    finish_current(&mut session);
    assert_eq!(session.playback().paragraph(), Some(2));

    finish_current(&mut session);
    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.active_paragraph(), Some(2));
    assert_eq!(
        spoken_texts(&session),
        ["First paragraph.", "Second one.", "Third and last."]
    );
}

#[test]
fn manual_navigation_stops_continuous_reading() {
    let mut session = session(THREE);
    session.speak_all();
    finish_current(&mut session);
    finish_current(&mut session);
    assert_eq!(session.playback().paragraph(), Some(2));
    let playing = session.speech().current();
    assert!(playing.is_some());

    session.select_paragraph(0);

    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.speech().current(), None);
    assert_eq!(session.active_paragraph(), Some(0));

    // The cancelled utterance reporting late must not resume anything.
    session
        .speech_mut()
        .push_event(SpeechEvent::Finished(playing.unwrap()));
    session.tick();
    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.active_paragraph(), Some(0));
    assert_eq!(session.speech().spoken().len(), 3);
}

#[test]
fn pointer_click_does_not_scroll() {
    let mut session = session(THREE);
    session.select_paragraph(1);
    assert!(session.take_notices().is_empty());

    session.next_paragraph(NavOrigin::Keyboard);
    assert_eq!(scrolls(&session.take_notices()), [2]);
}

#[test]
fn speak_current_requires_an_active_paragraph() {
    let mut session = session(THREE);
    session.speak_current();
    assert_eq!(session.playback(), PlaybackState::Idle);
    assert!(session.speech().spoken().is_empty());
}

#[test]
fn single_paragraph_speech_does_not_advance() {
    let mut session = session(THREE);
    session.select_paragraph(1);
    session.speak_current();
    assert!(matches!(
        session.playback(),
        PlaybackState::SpeakingSingle { paragraph: 1, .. }
    ));

    finish_current(&mut session);
    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.active_paragraph(), Some(1));
    assert_eq!(spoken_texts(&session), ["Second one."]);
}

#[test]
fn reselecting_the_active_paragraph_keeps_speaking() {
    let mut session = session(THREE);
    session.select_paragraph(1);
    session.speak_current();
    let cancels = session.speech().cancel_count();
    let playing = session.speech().current();

    session.select_paragraph(1);

    assert!(matches!(
        session.playback(),
        PlaybackState::SpeakingSingle { paragraph: 1, .. }
    ));
    assert_eq!(session.speech().cancel_count(), cancels);
    assert_eq!(session.speech().current(), playing);
}

#[test]
fn voice_next_on_last_paragraph_keeps_reading() {
    let mut session = session(THREE);
    session.select_paragraph(2);
    session.set_voice_control(true);
    hear(&mut session, "read all");
    let cancels = session.speech().cancel_count();

    hear(&mut session, "next");

    assert!(matches!(
        session.playback(),
        PlaybackState::SpeakingContinuous { paragraph: 2, .. }
    ));
    assert_eq!(session.active_paragraph(), Some(2));
    assert_eq!(session.speech().cancel_count(), cancels);
    assert_eq!(scrolls(&session.take_notices()), [2]);
}

#[test]
fn engine_error_goes_idle_without_retry() {
    let mut session = session(THREE);
    session.speak_all();
    session.speech_mut().fail_current();
    session.tick();

    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.speech().spoken().len(), 1);
    assert_eq!(session.active_paragraph(), Some(0));
}

#[test]
fn restarting_speech_ignores_the_cancelled_utterance_error() {
    let mut session = session(THREE);
    session.select_paragraph(0);
    session.speak_current();
    let first = session.speech().current().unwrap();
    let cancels = session.speech().cancel_count();

    session.speak_current();
    assert_eq!(session.speech().cancel_count(), cancels + 1);
    session.speech_mut().push_event(SpeechEvent::Failed(first));
    session.tick();

    assert!(session.playback().is_speaking());
    assert_eq!(session.speech().spoken().len(), 2);
}

#[test]
fn stop_is_idempotent() {
    let mut session = session(THREE);
    session.speak_all();
    session.stop();
    session.stop();
    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.speech().current(), None);
}

#[test]
fn missing_voice_falls_back_to_engine_default() {
    let voices = vec![Voice {
        id: "samantha".into(),
        display_name: "Samantha".into(),
        language_tag: "en-US".into(),
    }];
    let mut session = ReadingSession::new(
        ScriptedSpeech::with_voices(voices),
        ScriptedRecognition::new(),
        MemorySettingsStore::default(),
        VIEWPORT,
    );
    session.load_document(THREE);
    session.select_paragraph(0);

    session.update_setting(SettingUpdate::SpeechVoice("daniel".into()));
    session.speak_current();
    session.update_setting(SettingUpdate::SpeechVoice("samantha".into()));
    session.speak_current();

    let chosen: Vec<_> = session
        .speech()
        .spoken()
        .iter()
        .map(|utterance| utterance.voice.clone())
        .collect();
    assert_eq!(chosen, [None, Some(String::from("samantha"))]);
    assert_eq!(session.voices().len(), 1);
}

#[test]
fn loading_a_document_resets_focus_playback_and_marks() {
    let mut session = session(THREE);
    session.select_paragraph(1);
    session.highlight_range(1, 0, 6).unwrap();
    session.set_annotation(1, "note");
    session.speak_all();

    session.load_document("Brand new text");

    assert_eq!(session.active_paragraph(), None);
    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.speech().current(), None);
    assert!(session.highlights().is_empty());
    assert_eq!(session.annotation(1), None);
    assert_eq!(session.document().len(), 1);
}

#[test]
fn read_all_on_empty_document_is_ignored() {
    let mut session = session("   \n");
    session.speak_all();
    assert_eq!(session.active_paragraph(), None);
    assert_eq!(session.playback(), PlaybackState::Idle);
}

#[test]
fn highlights_are_validated_against_the_paragraph() {
    let mut session = session(THREE);
    assert!(session.add_highlight(0, 0, 5, "First").is_ok());
    assert_eq!(
        session.add_highlight(0, 0, 5, "Other"),
        Err(HighlightError::SnapshotMismatch)
    );
    assert_eq!(
        session.add_highlight(9, 0, 1, "x"),
        Err(HighlightError::UnknownParagraph)
    );
    assert_eq!(
        session.highlight_range(1, 3, 99),
        Err(HighlightError::OutOfBounds)
    );
    assert_eq!(session.highlight_range(1, 3, 3), Err(HighlightError::EmptyRange));

    let id = session.highlight_range(1, 0, 6).unwrap();
    assert!(session.remove_highlight(1, id));
    assert!(!session.remove_highlight(1, id));
}

#[test]
fn keyboard_input_navigates_and_speaks() {
    let mut session = session(THREE);
    let mut input = ScriptedInput::new([
        InputEvent::NextParagraph,
        InputEvent::NextParagraph,
        InputEvent::SpeakCurrent,
    ]);

    assert_eq!(
        session.process_inputs(&mut input),
        TickResult::RenderRequested
    );
    assert!(matches!(
        session.playback(),
        PlaybackState::SpeakingSingle { paragraph: 1, .. }
    ));

    input.push(InputEvent::PreviousParagraph);
    session.process_inputs(&mut input);
    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.active_paragraph(), Some(0));
    assert_eq!(session.process_inputs(&mut input), TickResult::NoRender);
}

#[test]
fn voice_read_all_does_not_navigate() {
    let mut session = session(THREE);
    session.select_paragraph(1);
    session.set_voice_control(true);

    hear(&mut session, "please read all of this");

    assert!(matches!(
        session.playback(),
        PlaybackState::SpeakingContinuous { paragraph: 1, .. }
    ));
    assert_eq!(session.active_paragraph(), Some(1));
    assert!(scrolls(&session.take_notices()).is_empty());
    assert_eq!(
        session.voice_control().last_transcript(),
        "please read all of this"
    );
}

#[test]
fn voice_navigation_clamps_at_both_ends() {
    let mut session = session(THREE);
    session.set_voice_control(true);

    hear(&mut session, "previous");
    assert_eq!(session.active_paragraph(), Some(0));
    hear(&mut session, "Next");
    hear(&mut session, "next");
    hear(&mut session, "next please");
    assert_eq!(session.active_paragraph(), Some(2));
    assert_eq!(scrolls(&session.take_notices()), [0, 1, 2, 2]);

    hear(&mut session, "go back");
    assert_eq!(session.active_paragraph(), Some(1));
}

#[test]
fn voice_stop_interrupts_reading() {
    let mut session = session(THREE);
    session.set_voice_control(true);
    hear(&mut session, "start reading");
    assert!(session.playback().is_speaking());

    hear(&mut session, "pause");
    assert_eq!(session.playback(), PlaybackState::Idle);
}

#[test]
fn voice_next_during_reading_interrupts_it() {
    let mut session = session(THREE);
    session.set_voice_control(true);
    hear(&mut session, "read all");

    hear(&mut session, "next");
    assert_eq!(session.playback(), PlaybackState::Idle);
    assert_eq!(session.active_paragraph(), Some(1));
}

#[test]
fn unmatched_and_interim_results_do_nothing() {
    let mut session = session(THREE);
    session.set_voice_control(true);

    session.recognizer_mut().hear_interim("next");
    session.tick();
    assert_eq!(session.active_paragraph(), None);
    assert_eq!(session.voice_control().last_transcript(), "");

    hear(&mut session, "  Hello There ");
    assert_eq!(session.active_paragraph(), None);
    assert_eq!(session.voice_control().last_transcript(), "hello there");
}

#[test]
fn results_after_switching_off_are_dropped() {
    let mut session = session(THREE);
    session.set_voice_control(true);
    session.set_voice_control(false);
    assert_eq!(session.recognizer().stops(), 1);

    hear(&mut session, "next");
    assert_eq!(session.active_paragraph(), None);
}

#[test]
fn voice_setting_commands_update_settings() {
    let mut session = session(THREE);
    session.set_voice_control(true);

    hear(&mut session, "bionic reading on");
    hear(&mut session, "focus mode on");
    assert!(session.settings().bionic_reading);
    assert!(session.settings().focus_mode);

    hear(&mut session, "focus off");
    assert!(!session.settings().focus_mode);
}

#[test]
fn recognizer_restarts_while_active_only() {
    let mut session = session(THREE);
    session.set_voice_control(true);
    assert_eq!(session.recognizer().starts(), 1);

    session.recognizer_mut().end_session();
    session.tick();
    assert_eq!(session.recognizer().starts(), 2);
    assert!(session.recognizer().is_running());

    // Already running: the start error is swallowed.
    session.handle_recognition_event(RecognitionEvent::SessionEnded);
    assert!(session.voice_control().is_active());
    assert!(session.take_notices().is_empty());

    session.set_voice_control(false);
    session.recognizer_mut().end_session();
    session.tick();
    assert_eq!(session.recognizer().starts(), 2);
}

#[test]
fn permission_denied_disables_voice_control_and_alerts() {
    let mut session = session(THREE);
    session.set_voice_control(true);

    session.recognizer_mut().fail(RecognitionErrorCode::NotAllowed);
    session.tick();

    assert!(!session.voice_control().is_active());
    assert_eq!(
        session.take_notices(),
        [SessionNotice::Alert(UserAlert::MicrophonePermissionDenied)]
    );

    session.recognizer_mut().end_session();
    session.tick();
    assert_eq!(session.recognizer().starts(), 1);
}

#[test]
fn transient_recognition_errors_keep_listening() {
    let mut session = session(THREE);
    session.set_voice_control(true);

    session.recognizer_mut().fail(RecognitionErrorCode::NoSpeech);
    session.recognizer_mut().fail(RecognitionErrorCode::Network);
    session.tick();

    assert!(session.voice_control().is_active());
    assert!(session.take_notices().is_empty());
}

#[test]
fn failed_restart_disables_voice_control_and_alerts() {
    let mut session = session(THREE);
    session.set_voice_control(true);
    assert!(session.voice_control().is_active());

    session.recognizer_mut().set_unavailable(true);
    session.recognizer_mut().end_session();
    session.tick();

    assert!(!session.voice_control().is_active());
    assert_eq!(session.recognizer().starts(), 1);
    assert_eq!(
        session.take_notices(),
        [SessionNotice::Alert(UserAlert::VoiceControlUnavailable)]
    );

    // Inactive now, so a later session end does not retry.
    session.recognizer_mut().end_session();
    session.tick();
    assert!(session.take_notices().is_empty());
}

#[test]
fn unavailable_recognizer_is_reported() {
    let mut session = ReadingSession::new(
        ScriptedSpeech::new(),
        ScriptedRecognition::unavailable(),
        MemorySettingsStore::default(),
        VIEWPORT,
    );
    session.apply_input(InputEvent::ToggleVoiceControl);

    assert!(!session.voice_control().is_active());
    assert_eq!(
        session.take_notices(),
        [SessionNotice::Alert(UserAlert::VoiceControlUnavailable)]
    );
}

struct OneWord;

impl HitTester for OneWord {
    fn resolve_caret(&self, _point: Point) -> Option<CaretHit<'_>> {
        Some(CaretHit {
            text: "magnify me",
            offset: 2,
        })
    }

    fn resolve_element(&self, _point: Point) -> Option<ElementHit<'_>> {
        None
    }
}

#[test]
fn loupe_tracks_pointer_only_while_enabled() {
    let mut session = session(THREE);
    let cursor = Point::new(1000.0, 10.0);
    assert!(session.pointer_moved(&OneWord, cursor).is_none());

    session.set_voice_control(true);
    hear(&mut session, "magnifier on");
    let view = session.pointer_moved(&OneWord, cursor).cloned().unwrap();
    assert_eq!(view.target.text(), "magnify");
    assert_eq!(view.position, Point::new(724.0, 30.0));

    hear(&mut session, "magnifier off");
    assert!(session.loupe_view().is_none());
    assert!(session.pointer_moved(&OneWord, cursor).is_none());
}

#[test]
fn loupe_starts_attached_when_persisted_on() {
    let store = MemorySettingsStore::with(Settings {
        loupe_active: true,
        ..Settings::default()
    });
    let mut session = ReadingSession::new(
        ScriptedSpeech::new(),
        ScriptedRecognition::new(),
        store,
        VIEWPORT,
    );
    assert!(session.pointer_moved(&OneWord, Point::new(5.0, 5.0)).is_some());
}

#[test]
fn views_reflect_focus_notes_and_speech() {
    let mut session = session(THREE);
    session.update_setting(SettingUpdate::FocusMode(true));
    assert!(session.paragraph_views().iter().all(|view| !view.dimmed));

    session.set_annotation(0, "");
    session.set_annotation(2, "check this");
    session.select_paragraph(1);
    session.speak_current();

    let views = session.paragraph_views();
    assert_eq!(views.len(), 3);
    assert_eq!(
        views.iter().map(|view| view.dimmed).collect::<Vec<_>>(),
        [true, false, true]
    );
    assert!(views[1].active && views[1].speaking);
    assert!(!views[0].has_note);
    assert!(views[2].has_note);
    assert!(session.paragraph_view(3).is_none());
}

#[test]
fn bionic_setting_changes_rendered_runs() {
    let mut session = session("Reading aloud");
    assert_eq!(session.paragraph_view(0).unwrap().runs.len(), 1);

    session.update_setting(SettingUpdate::BionicReading(true));
    let view = session.paragraph_view(0).unwrap();
    let joined: String = view.runs.iter().map(|run| run.text).collect();
    assert_eq!(joined, "Reading aloud");
    assert_eq!(view.runs[0].text, "Rea");
}

#[test]
fn dropping_the_session_releases_engines() {
    let mut speech = ScriptedSpeech::new();
    let mut recognition = ScriptedRecognition::new();
    {
        let mut session = ReadingSession::new(
            &mut speech,
            &mut recognition,
            MemorySettingsStore::default(),
            VIEWPORT,
        );
        session.load_document(THREE);
        session.set_voice_control(true);
        session.speak_all();
    }

    assert_eq!(recognition.aborts(), 1);
    assert!(!recognition.is_running());
    assert_eq!(speech.current(), None);
}

#[test]
fn dropping_the_session_aborts_an_idle_recognizer_too() {
    let mut recognition = ScriptedRecognition::new();
    {
        let session = ReadingSession::new(
            ScriptedSpeech::new(),
            &mut recognition,
            MemorySettingsStore::default(),
            VIEWPORT,
        );
        assert!(!session.voice_control().is_active());
    }

    assert_eq!(recognition.aborts(), 1);
    assert_eq!(recognition.starts(), 0);
}
