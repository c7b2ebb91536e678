//! Game settings and preferences
//!
//! Persisted separately from the best score, as JSON under one key.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KeyValueStore};
use crate::platform::Action;

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

    /// Next preset, wrapping from High back to Low
    pub fn next(&self) -> Self {
        match self {
            QualityPreset::Low => QualityPreset::Medium,
            QualityPreset::Medium => QualityPreset::High,
            QualityPreset::High => QualityPreset::Low,
        }
    }

    /// Maximum bubbles drawn per frame
    pub fn max_bubbles(&self) -> usize {
        match self {
            QualityPreset::Low => 24,
            QualityPreset::Medium => 96,
            QualityPreset::High => 256,
        }
    }

    /// Triangle segments used for round shapes
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 8,
            QualityPreset::Medium => 16,
            QualityPreset::High => 32,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Bubble particles
    pub bubbles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no crab tilt)
    pub reduced_motion: bool,
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            bubbles: true,
            show_fps: false,
            reduced_motion: false,
            high_contrast: false,
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_crab_settings";

    /// Apply a settings toggle. Returns true when something changed and
    /// should be saved.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::CycleQuality => {
                self.quality = self.quality.next();
                log::info!("Quality: {}", self.quality.as_str());
            }
            Action::ToggleBubbles => self.bubbles = !self.bubbles,
            Action::ToggleFps => self.show_fps = !self.show_fps,
            Action::ToggleReducedMotion => self.reduced_motion = !self.reduced_motion,
            Action::ToggleHighContrast => self.high_contrast = !self.high_contrast,
            Action::Jump | Action::ToggleAutopilot => return false,
        }
        true
    }

    /// Effective bubble cap (0 when bubbles are off)
    pub fn max_bubbles(&self) -> usize {
        if self.bubbles {
            self.quality.max_bubbles()
        } else {
            0
        }
    }

    /// Crab tilt actually drawn (respects reduced_motion)
    pub fn effective_tilt(&self, rotation_degrees: f32) -> f32 {
        if self.reduced_motion {
            0.0
        } else {
            rotation_degrees
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json(store, Self::STORAGE_KEY) {
            Some(settings) => {
                log::info!("Loaded settings");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged only
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match persistence::save_json(store, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}
