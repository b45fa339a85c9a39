//! Reader settings and their persistence boundary.

use alloc::string::String;

use log::{debug, warn};

pub const MIN_FONT_SIZE_PX: u8 = 12;
pub const MAX_FONT_SIZE_PX: u8 = 64;
const LINE_HEIGHT_RANGE: (f32, f32) = (1.0, 3.0);
const LETTER_SPACING_RANGE_EM: (f32, f32) = (-0.1, 0.5);

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Sepia,
    HighContrast,
}

impl Theme {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Sepia => "sepia",
            Self::HighContrast => "high-contrast",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "sepia" => Some(Self::Sepia),
            "high-contrast" => Some(Self::HighContrast),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FontFamily {
    #[default]
    Sans,
    Serif,
    Mono,
}

impl FontFamily {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sans => "sans",
            Self::Serif => "serif",
            Self::Mono => "mono",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "sans" => Some(Self::Sans),
            "serif" => Some(Self::Serif),
            "mono" => Some(Self::Mono),
            _ => None,
        }
    }
}

/// User-tunable reading settings.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub font_size_px: u8,
    pub line_height: f32,
    pub letter_spacing_em: f32,
    pub theme: Theme,
    pub font_family: FontFamily,
    pub focus_mode: bool,
    pub loupe_active: bool,
    pub hover_zoom: bool,
    pub bionic_reading: bool,
    /// Pixels per second, `0` disables auto-scroll.
    pub auto_scroll_speed: u16,
    /// Preferred voice id, empty for the engine default.
    pub speech_voice: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size_px: 20,
            line_height: 1.6,
            letter_spacing_em: 0.0,
            theme: Theme::Light,
            font_family: FontFamily::Sans,
            focus_mode: false,
            loupe_active: false,
            hover_zoom: false,
            bionic_reading: false,
            auto_scroll_speed: 0,
            speech_voice: String::new(),
        }
    }
}

/// One change to [`Settings`].
#[derive(Clone, Debug, PartialEq)]
pub enum SettingUpdate {
    FontSize(u8),
    LineHeight(f32),
    LetterSpacing(f32),
    Theme(Theme),
    FontFamily(FontFamily),
    FocusMode(bool),
    Loupe(bool),
    HoverZoom(bool),
    BionicReading(bool),
    AutoScrollSpeed(u16),
    SpeechVoice(String),
}

impl Settings {
    /// Apply one update, clamping numeric values. Returns whether anything
    /// changed.
    pub fn apply(&mut self, update: SettingUpdate) -> bool {
        let before = self.clone();
        match update {
            SettingUpdate::FontSize(px) => {
                self.font_size_px = px.clamp(MIN_FONT_SIZE_PX, MAX_FONT_SIZE_PX);
            }
            SettingUpdate::LineHeight(value) => {
                if let Some(value) = clamp_finite(value, LINE_HEIGHT_RANGE) {
                    self.line_height = value;
                }
            }
            SettingUpdate::LetterSpacing(value) => {
                if let Some(value) = clamp_finite(value, LETTER_SPACING_RANGE_EM) {
                    self.letter_spacing_em = value;
                }
            }
            SettingUpdate::Theme(theme) => self.theme = theme,
            SettingUpdate::FontFamily(family) => self.font_family = family,
            SettingUpdate::FocusMode(on) => self.focus_mode = on,
            SettingUpdate::Loupe(on) => self.loupe_active = on,
            SettingUpdate::HoverZoom(on) => self.hover_zoom = on,
            SettingUpdate::BionicReading(on) => self.bionic_reading = on,
            SettingUpdate::AutoScrollSpeed(speed) => self.auto_scroll_speed = speed,
            SettingUpdate::SpeechVoice(voice) => self.speech_voice = voice,
        }
        *self != before
    }
}

impl Settings {
    /// Bring a stored record back into range. Non-finite floats fall back to
    /// their defaults.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        Self {
            font_size_px: self.font_size_px.clamp(MIN_FONT_SIZE_PX, MAX_FONT_SIZE_PX),
            line_height: clamp_finite(self.line_height, LINE_HEIGHT_RANGE)
                .unwrap_or(defaults.line_height),
            letter_spacing_em: clamp_finite(self.letter_spacing_em, LETTER_SPACING_RANGE_EM)
                .unwrap_or(defaults.letter_spacing_em),
            ..self
        }
    }
}

fn clamp_finite(value: f32, (min, max): (f32, f32)) -> Option<f32> {
    value.is_finite().then(|| value.clamp(min, max))
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<Settings>, Self::Error>;
    fn save(&mut self, settings: &Settings) -> Result<(), Self::Error>;
}

/// Live settings plus the single load/save boundary to a store.
#[derive(Debug)]
pub struct SettingsSync<ST: SettingsStore> {
    store: ST,
    current: Settings,
    dirty: bool,
}

impl<ST: SettingsStore> SettingsSync<ST> {
    /// Load persisted settings, falling back to defaults.
    pub fn load(mut store: ST) -> Self {
        let current = match store.load() {
            Ok(Some(settings)) => settings.normalized(),
            Ok(None) => Settings::default(),
            Err(_) => {
                warn!("settings: load failed, using defaults");
                Settings::default()
            }
        };
        Self {
            store,
            current,
            dirty: false,
        }
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn store(&self) -> &ST {
        &self.store
    }

    /// Apply and persist one update. Returns whether settings changed.
    pub fn commit(&mut self, update: SettingUpdate) -> bool {
        let changed = self.current.apply(update);
        if changed {
            debug!("settings: committed {:?}", self.current);
            self.dirty = true;
            self.flush();
        }
        changed
    }

    /// Save pending changes. A failed save stays pending for the next commit.
    pub fn flush(&mut self) {
        if !self.dirty {
            return;
        }
        match self.store.save(&self.current) {
            Ok(()) => self.dirty = false,
            Err(_) => warn!("settings: save failed, keeping change pending"),
        }
    }
}

/// In-memory store, optionally failing saves.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    pub saved: Option<Settings>,
    pub saves: usize,
    pub fail_saves: bool,
}

impl MemorySettingsStore {
    pub fn with(settings: Settings) -> Self {
        Self {
            saved: Some(settings),
            ..Self::default()
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    type Error = ();

    fn load(&mut self) -> Result<Option<Settings>, Self::Error> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), Self::Error> {
        if self.fail_saves {
            return Err(());
        }
        self.saves += 1;
        self.saved = Some(settings.clone());
        Ok(())
    }
}
