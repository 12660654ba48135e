//! Player preferences
//!
//! Kept apart from [`crate::Tuning`]: these are the player's choices, not
//! game balance. The UI shell decides where (and whether) to store them.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Silence everything
    pub muted: bool,

    // === HUD ===
    /// Show the how-to-play screen before the first round
    pub show_tutorial: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.5,
            music_volume: 0.3,
            muted: false,
            show_tutorial: true,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Self>(json).map(Self::clamped)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Force volumes into 0.0 - 1.0
    pub fn clamped(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Effective sound effect volume (respects mute)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Effective music volume (respects mute)
    pub fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_clamps_volumes() {
        let settings = Settings::from_json(r#"{"master_volume": 3.0, "sfx_volume": -1.0}"#)
            .expect("valid settings");
        assert_eq!(settings.master_volume, 1.0);
        assert_eq!(settings.sfx_volume, 0.0);
        assert_eq!(settings.music_volume, 0.3);
    }

    #[test]
    fn test_mute() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        assert_eq!(settings.effective_sfx_volume(), 0.0);
        assert_eq!(settings.effective_music_volume(), 0.0);
    }

    #[test]
    fn test_tutorial_preference() {
        assert!(Settings::default().show_tutorial);
        let settings = Settings::from_json(r#"{"show_tutorial": false}"#).expect("valid settings");
        assert!(!settings.show_tutorial);
        assert_eq!(settings.master_volume, 0.8);
        let back = Settings::from_json(&settings.to_json().expect("serializes")).expect("valid");
        assert_eq!(back, settings);
    }
}
