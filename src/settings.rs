//! Game settings and preferences
//!
//! Persisted in LocalStorage as JSON. Scores are never stored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::TiltTuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Tilt ===
    /// Use the orientation sensor when the platform allows it
    pub tilt_enabled: bool,
    /// Horizontal sensitivity (applied to gamma)
    pub tilt_sensitivity_x: f32,
    /// Vertical sensitivity (applied to beta)
    pub tilt_sensitivity_y: f32,
    /// Overall tilt scale
    pub tilt_gain: f32,
    /// Holding angle (degrees) treated as level
    pub tilt_neutral_beta: f32,

    // === Layout ===
    /// Portrait screens at most this wide pause the game
    pub portrait_max_width: f32,

    // === Debug ===
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tilt_enabled: true,
            tilt_sensitivity_x: TILT_SENSITIVITY,
            tilt_sensitivity_y: TILT_SENSITIVITY,
            tilt_gain: TILT_GAIN,
            tilt_neutral_beta: TILT_NEUTRAL_BETA,

            portrait_max_width: PORTRAIT_MAX_WIDTH,

            seed: None,
        }
    }
}

impl Settings {
    /// Tilt parameters for the simulation
    pub fn tilt_tuning(&self) -> TiltTuning {
        TiltTuning {
            sensitivity: Vec2::new(self.tilt_sensitivity_x, self.tilt_sensitivity_y),
            gain: self.tilt_gain,
            neutral_beta: self.tilt_neutral_beta,
        }
    }

    /// Parse settings JSON, falling back to defaults on malformed input.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "neon_dodge_settings";

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

        if let (Some(storage), Some(json)) = (storage, self.to_json()) {
            let _ = storage.set_item(Self::STORAGE_KEY, &json);
            log::info!("Settings saved");
        }
    }

    /// Native: read the JSON from `NEON_DODGE_SETTINGS` if set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var(Self::STORAGE_KEY.to_uppercase()) {
            Ok(json) => Self::from_json(&json),
            Err(_) => Self::default(),
        }
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
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"tilt_neutral_beta": 30.0, "seed": 9}"#);
        assert_eq!(settings.tilt_neutral_beta, 30.0);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.tilt_gain, TILT_GAIN);
        assert!(settings.tilt_enabled);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            tilt_sensitivity_x: 2.0,
            portrait_max_width: 800.0,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_tilt_tuning() {
        let tuning = Settings {
            tilt_sensitivity_y: 4.0,
            ..Default::default()
        }
        .tilt_tuning();
        assert_eq!(tuning.sensitivity, Vec2::new(TILT_SENSITIVITY, 4.0));
        assert_eq!(tuning.neutral_beta, TILT_NEUTRAL_BETA);
    }
}
