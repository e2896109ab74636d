//! Game settings and preferences
//!
//! Persisted as JSON next to the working directory; a missing or corrupt
//! file falls back to defaults.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum particles drawn for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 128,
            QualityPreset::High => 256,
        }
    }

    /// Trail length multiplier (1.0 = full)
    pub fn trail_quality(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.25,
            QualityPreset::Medium => 0.6,
            QualityPreset::High => 1.0,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    /// Ball trails
    pub trails: bool,
    /// Particle effects (bursts on bounces, gates, collapses)
    pub particles: bool,
    /// Full-screen flash on collapse
    pub collapse_flash: bool,

    /// Reduced motion (suppresses the flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            trails: true,
            particles: true,
            collapse_flash: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Settings file location
    const FILE_NAME: &'static str = "quantum-pong-settings.json";

    /// Effective flash (respects reduced_motion)
    pub fn effective_flash(&self) -> bool {
        self.collapse_flash && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        match std::fs::read_to_string(Self::FILE_NAME) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", Self::FILE_NAME);
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring bad settings file: {err}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(self) {
            match std::fs::write(Self::FILE_NAME, json) {
                Ok(()) => log::info!("Settings saved"),
                Err(err) => log::warn!("Failed to save settings: {err}"),
            }
        }
    }
}
