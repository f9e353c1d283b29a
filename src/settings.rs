//! Menu choices and preferences
//!
//! Persisted in LocalStorage so the menu reopens with the last run's setup.

use serde::{Deserialize, Serialize};

use crate::sim::{RunConfig, RunMode};
use crate::theme::Theme;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Run setup ===
    pub theme: Theme,
    /// Smallest multiplication operand
    pub math_min: i32,
    /// Largest multiplication operand
    pub math_max: i32,
    pub mode: RunMode,
    /// Timed mode limit in seconds
    pub time_limit_secs: u32,
    /// Target mode goal
    pub target_score: i32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let run = RunConfig::default();
        Self {
            theme: run.theme,
            math_min: run.math_min,
            math_max: run.math_max,
            mode: run.mode,
            time_limit_secs: run.time_limit_secs,
            target_score: run.target_score,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Configuration for a new run
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            math_min: self.math_min,
            math_max: self.math_max,
            mode: self.mode,
            time_limit_secs: self.time_limit_secs,
            target_score: self.target_score,
            theme: self.theme,
        }
        .normalized()
    }

    /// Remember the setup of a run that was just started
    pub fn remember_run(&mut self, config: &RunConfig) {
        self.theme = config.theme;
        self.math_min = config.math_min;
        self.math_max = config.math_max;
        self.mode = config.mode;
        self.time_limit_secs = config.time_limit_secs;
        self.target_score = config.target_score;
    }

    /// Parse stored JSON, falling back to defaults on anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "jump_math_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} outside the browser", Self::STORAGE_KEY);
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
    fn test_defaults_match_run_config() {
        assert_eq!(Settings::default().run_config(), RunConfig::default());
    }

    #[test]
    fn test_run_config_is_normalized() {
        let settings = Settings {
            math_min: 9,
            math_max: 3,
            time_limit_secs: 0,
            target_score: -4,
            ..Default::default()
        };
        let config = settings.run_config();
        assert_eq!((config.math_min, config.math_max), (3, 9));
        assert_eq!(config.time_limit_secs, 1);
        assert_eq!(config.target_score, 1);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"theme":"snow","mode":"target"}"#);
        assert_eq!(settings.theme, Theme::Snow);
        assert_eq!(settings.mode, RunMode::Target);
        assert_eq!(settings.math_max, 12);
        assert_eq!(settings.master_volume, 0.8);
    }

    #[test]
    fn test_garbage_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_remember_run_round_trips() {
        let config = RunConfig {
            math_min: 2,
            math_max: 5,
            mode: RunMode::Target,
            time_limit_secs: 60,
            target_score: 20,
            theme: Theme::City,
        };
        let mut settings = Settings::default();
        settings.remember_run(&config);
        let json = serde_json::to_string(&settings).unwrap_or_default();
        assert_eq!(Settings::from_json(&json).run_config(), config);
    }
}
