//! Runner settings
//!
//! Loaded from an optional JSON file; any missing field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DRAW_HZ;

/// Errors reading a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Headless runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (None = derive from the clock)
    pub seed: Option<u64>,
    /// Frames to simulate before giving up
    pub max_frames: u64,
    /// Simulated frame length in milliseconds
    pub frame_ms: f64,
    /// Draw cadence for the renderer
    pub draw_hz: f64,
    /// Let the demo autopilot fire
    pub autopilot: bool,
    /// Minimum time between autopilot volleys (ms)
    pub autopilot_cooldown_ms: f64,
    /// Emit JSON snapshots to stdout
    pub snapshots: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_frames: 60 * 60 * 5,
            frame_ms: 1000.0 / 60.0,
            draw_hz: DRAW_HZ,
            autopilot: true,
            autopilot_cooldown_ms: 400.0,
            snapshots: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the loop cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.frame_ms > 0.0) {
            return Err(SettingsError::Invalid {
                field: "frame_ms",
                reason: format!("must be positive, got {}", self.frame_ms),
            });
        }
        if !(self.draw_hz > 0.0) {
            return Err(SettingsError::Invalid {
                field: "draw_hz",
                reason: format!("must be positive, got {}", self.draw_hz),
            });
        }
        if self.autopilot_cooldown_ms < 0.0 {
            return Err(SettingsError::Invalid {
                field: "autopilot_cooldown_ms",
                reason: "must not be negative".into(),
            });
        }
        Ok(())
    }

    /// Milliseconds between draws
    pub fn draw_interval_ms(&self) -> f64 {
        1000.0 / self.draw_hz
    }
}
