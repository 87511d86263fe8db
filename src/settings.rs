//! App preferences: theme, sound and haptics
//!
//! Passed explicitly into each toy rather than read from globals. Persisted
//! in LocalStorage as one plain string per key.

use serde::{Deserialize, Serialize};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// User preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    /// Synthesized tones
    pub sound_enabled: bool,
    /// Vibration feedback
    pub haptic_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            sound_enabled: false,
            haptic_enabled: true,
        }
    }
}

impl Settings {
    pub const SOUND_KEY: &'static str = "stressball-sound";
    pub const HAPTIC_KEY: &'static str = "stressball-haptic";
    pub const THEME_KEY: &'static str = "stressball-theme";

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn toggle_haptic(&mut self) -> bool {
        self.haptic_enabled = !self.haptic_enabled;
        self.haptic_enabled
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Build settings from stored strings; absent or unrecognized values keep
    /// their defaults
    pub fn from_stored(sound: Option<&str>, haptic: Option<&str>, theme: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            sound_enabled: sound.map_or(defaults.sound_enabled, |s| s == "true"),
            haptic_enabled: haptic.map_or(defaults.haptic_enabled, |s| s == "true"),
            theme: theme.and_then(Theme::from_str).unwrap_or(defaults.theme),
        }
    }

    /// Key/value pairs as written to storage
    pub fn to_stored(&self) -> [(&'static str, &'static str); 3] {
        let flag = |b: bool| if b { "true" } else { "false" };
        [
            (Self::SOUND_KEY, flag(self.sound_enabled)),
            (Self::HAPTIC_KEY, flag(self.haptic_enabled)),
            (Self::THEME_KEY, self.theme.as_str()),
        ]
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        let Some(storage) = storage else {
            log::info!("No LocalStorage, using default settings");
            return Self::default();
        };

        let get = |key: &str| storage.get_item(key).ok().flatten();
        let sound = get(Self::SOUND_KEY);
        let haptic = get(Self::HAPTIC_KEY);
        let theme = get(Self::THEME_KEY);
        let settings = Self::from_stored(sound.as_deref(), haptic.as_deref(), theme.as_deref());
        log::info!("Loaded settings: {:?}", settings);
        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            for (key, value) in self.to_stored() {
                if storage.set_item(key, value).is_err() {
                    log::warn!("Failed to store {}", key);
                }
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert!(!settings.sound_enabled);
        assert!(settings.haptic_enabled);
    }

    #[test]
    fn test_from_stored() {
        let settings = Settings::from_stored(Some("true"), Some("false"), Some("dark"));
        assert!(settings.sound_enabled);
        assert!(!settings.haptic_enabled);
        assert_eq!(settings.theme, Theme::Dark);

        assert_eq!(Settings::from_stored(None, None, None), Settings::default());
        assert_eq!(
            Settings::from_stored(None, None, Some("sepia")).theme,
            Theme::Light
        );
    }

    #[test]
    fn test_stored_round_trip() {
        let mut settings = Settings::default();
        settings.toggle_sound();
        settings.toggle_theme();
        let stored = settings.to_stored();
        let restored = Settings::from_stored(Some(stored[0].1), Some(stored[1].1), Some(stored[2].1));
        assert_eq!(restored, settings);
    }

    #[test]
    fn test_toggles() {
        let mut settings = Settings::default();
        assert!(!settings.toggle_haptic());
        assert!(settings.toggle_haptic());
        assert_eq!(settings.toggle_theme(), Theme::Dark);
        assert_eq!(settings.toggle_theme(), Theme::Light);
    }
}
