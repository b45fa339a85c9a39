use std::{
    fs,
    io::{self, ErrorKind},
    path::PathBuf,
};

use log::{debug, warn};
use readaloud_core::settings::{FontFamily, SettingUpdate, Settings, SettingsStore, Theme};

/// Settings persisted as `key=value` lines.
#[derive(Debug)]
pub(super) struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub(super) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for FileSettingsStore {
    type Error = io::Error;

    fn load(&mut self) -> Result<Option<Settings>, Self::Error> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err),
        };

        let mut settings = Settings::default();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!("settings-file: skipping malformed line {:?}", line);
                continue;
            };
            match parse_setting(key.trim(), value.trim()) {
                Some(update) => {
                    settings.apply(update);
                }
                None => warn!("settings-file: unknown entry {:?}", line),
            }
        }
        debug!("settings-file: loaded {}", self.path.display());
        Ok(Some(settings))
    }

    fn save(&mut self, settings: &Settings) -> Result<(), Self::Error> {
        fs::write(&self.path, render_settings(settings))?;
        debug!("settings-file: saved {}", self.path.display());
        Ok(())
    }
}

/// Parse one `key value` pair as used by the settings file and `set`.
pub(super) fn parse_setting(key: &str, value: &str) -> Option<SettingUpdate> {
    let update = match key {
        "font-size" => SettingUpdate::FontSize(value.parse::<u16>().ok()?.min(255) as u8),
        "line-height" => SettingUpdate::LineHeight(value.parse().ok()?),
        "letter-spacing" => SettingUpdate::LetterSpacing(value.parse().ok()?),
        "theme" => SettingUpdate::Theme(Theme::from_key(value)?),
        "font" => SettingUpdate::FontFamily(FontFamily::from_key(value)?),
        "focus" => SettingUpdate::FocusMode(parse_flag(value)?),
        "loupe" => SettingUpdate::Loupe(parse_flag(value)?),
        "hover-zoom" => SettingUpdate::HoverZoom(parse_flag(value)?),
        "bionic" => SettingUpdate::BionicReading(parse_flag(value)?),
        "auto-scroll" => SettingUpdate::AutoScrollSpeed(value.parse().ok()?),
        "voice" => SettingUpdate::SpeechVoice(value.to_owned()),
        _ => return None,
    };
    Some(update)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "on" | "true" | "1" => Some(true),
        "off" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn flag(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

fn render_settings(settings: &Settings) -> String {
    format!(
        "font-size={}\nline-height={}\nletter-spacing={}\ntheme={}\nfont={}\nfocus={}\nloupe={}\nhover-zoom={}\nbionic={}\nauto-scroll={}\nvoice={}\n",
        settings.font_size_px,
        settings.line_height,
        settings.letter_spacing_em,
        settings.theme.key(),
        settings.font_family.key(),
        flag(settings.focus_mode),
        flag(settings.loupe_active),
        flag(settings.hover_zoom),
        flag(settings.bionic_reading),
        settings.auto_scroll_speed,
        settings.speech_voice,
    )
}
