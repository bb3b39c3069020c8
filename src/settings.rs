//! Game settings and preferences
//!
//! In-memory for the session; nothing is persisted.

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

    /// The next preset in the Low -> Medium -> High cycle
    pub fn cycle(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Emissive glow multiplier for this preset
    pub fn glow_strength(&self) -> f32 {
        match self {
            QualityPreset::Low => 0.6,
            QualityPreset::Medium => 1.0,
            QualityPreset::High => 1.4,
        }
    }

    /// Whether to render the starfield background
    pub fn starfield_enabled(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Pink pulse across the frame when a heart is collected
    pub collect_flash: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (skip the collect flash)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            collect_flash: true,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective collect flash (respects reduced_motion, off on Low)
    pub fn effective_collect_flash(&self) -> bool {
        self.collect_flash && !self.reduced_motion && self.quality != QualityPreset::Low
    }

    /// Glow multiplier for the current preset
    pub fn glow_strength(&self) -> f32 {
        self.quality.glow_strength()
    }

    /// Starfield toggle for the current preset
    pub fn starfield_enabled(&self) -> bool {
        self.quality.starfield_enabled()
    }
}
