//! Game settings and preferences
//!
//! Persisted as JSON under `persistence::SETTINGS_KEY`. Missing keys fall
//! back to their defaults; a missing or unreadable document falls back to
//! `Settings::default()`.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_BASE_SPEED, MIN_BASE_SPEED};
use crate::persistence::{SETTINGS_KEY, Storage};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frames per second at score 0
    pub base_speed: u32,
    /// Add one frame per second every few points
    pub speed_increase: bool,
    /// Draw the background grid
    pub grid_visible: bool,
    /// Particle effects (food sparkle, bursts)
    pub particles: bool,
    /// Sound effects
    pub sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_speed: 8,
            speed_increase: true,
            grid_visible: true,
            particles: true,
            sound: true,
        }
    }
}

/// Rows of the settings screen, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsField {
    #[default]
    BaseSpeed,
    SpeedIncrease,
    GridVisible,
    Particles,
    Sound,
}

impl SettingsField {
    pub const ALL: [SettingsField; 5] = [
        SettingsField::BaseSpeed,
        SettingsField::SpeedIncrease,
        SettingsField::GridVisible,
        SettingsField::Particles,
        SettingsField::Sound,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsField::BaseSpeed => "Base speed",
            SettingsField::SpeedIncrease => "Speed up with score",
            SettingsField::GridVisible => "Show grid",
            SettingsField::Particles => "Particles",
            SettingsField::Sound => "Sound",
        }
    }

    /// Row number on the settings screen
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next row, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous row, wrapping around
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Settings {
    /// Clamp values a hand-edited file may have pushed out of range
    pub fn sanitized(mut self) -> Self {
        self.base_speed = self.base_speed.clamp(MIN_BASE_SPEED, MAX_BASE_SPEED);
        self
    }

    /// Step a field: speed moves by `delta`, switches flip on any non-zero delta
    pub fn adjust(&mut self, field: SettingsField, delta: i32) {
        if delta == 0 {
            return;
        }
        match field {
            SettingsField::BaseSpeed => {
                let speed = self.base_speed as i64 + delta as i64;
                self.base_speed = speed.clamp(MIN_BASE_SPEED as i64, MAX_BASE_SPEED as i64) as u32;
            }
            _ => self.toggle(field),
        }
    }

    /// Flip a switch; the speed row is stepped up, wrapping to the minimum
    pub fn toggle(&mut self, field: SettingsField) {
        match field {
            SettingsField::BaseSpeed => {
                self.base_speed = if self.base_speed >= MAX_BASE_SPEED {
                    MIN_BASE_SPEED
                } else {
                    self.base_speed + 1
                };
            }
            SettingsField::SpeedIncrease => self.speed_increase = !self.speed_increase,
            SettingsField::GridVisible => self.grid_visible = !self.grid_visible,
            SettingsField::Particles => self.particles = !self.particles,
            SettingsField::Sound => self.sound = !self.sound,
        }
    }

    /// Display text for a row's value
    pub fn value_text(&self, field: SettingsField) -> String {
        let on_off = |b: bool| String::from(if b { "On" } else { "Off" });
        match field {
            SettingsField::BaseSpeed => self.base_speed.to_string(),
            SettingsField::SpeedIncrease => on_off(self.speed_increase),
            SettingsField::GridVisible => on_off(self.grid_visible),
            SettingsField::Particles => on_off(self.particles),
            SettingsField::Sound => on_off(self.sound),
        }
    }

    /// Parse a stored document, merging missing keys with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(store: &impl Storage) -> Self {
        match store.read(SETTINGS_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Settings unreadable ({e}), using defaults");
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// Save settings; failures are logged and otherwise ignored
    pub fn save(&self, store: &mut impl Storage) {
        let json = match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode settings: {e}");
                return;
            }
        };
        match store.write(SETTINGS_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {e}"),
        }
    }
}
