//! Gameplay configuration records
//!
//! Tunables are read once at startup from RON (or JSON) documents and stay
//! immutable for the rest of the session.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::weapons::WeaponDescriptor;

/// Base tuning for the player character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Maximum health (at least 1)
    pub max_health: f32,
    /// Maximum mana, 0 when the character has none
    pub max_mana: f32,
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Jump strength, drives the initial vertical speed
    pub jump_force: f32,
    /// Acceleration when starting to move
    pub acceleration: f32,
    /// Turn rate in degrees per second
    pub rotation_speed: f32,
}

impl PlayerConfig {
    /// Copy with every field raised to its allowed minimum
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            max_health: self.max_health.max(1.0),
            max_mana: self.max_mana.max(0.0),
            move_speed: self.move_speed.max(0.0),
            jump_force: self.jump_force.max(0.0),
            acceleration: self.acceleration.max(0.0),
            rotation_speed: self.rotation_speed.max(0.0),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            max_mana: 0.0,
            move_speed: 5.0,
            jump_force: 5.0,
            acceleration: 10.0,
            rotation_speed: 720.0,
        }
    }
}

/// Stat increase granted on every level gained
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelUpBonus {
    pub health: f32,
    pub mana: f32,
}

impl Default for LevelUpBonus {
    fn default() -> Self {
        Self {
            health: 10.0,
            mana: 5.0,
        }
    }
}

/// Experience curve: `base_experience * growth_factor^(level - 1)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Experience needed to go from level 1 to level 2
    pub base_experience: f32,
    /// Multiplier applied per level
    pub growth_factor: f32,
    /// Bonus applied to the linked stats per level gained
    pub level_up_bonus: LevelUpBonus,
}

impl ProgressionConfig {
    /// Copy with a usable curve: finite values, a positive base, a growth
    /// factor of at least 1 and non-negative bonuses. Unusable values fall
    /// back to the defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let base_experience = if self.base_experience.is_finite() && self.base_experience > 0.0 {
            self.base_experience
        } else {
            defaults.base_experience
        };
        let growth_factor = if self.growth_factor.is_finite() {
            self.growth_factor.max(1.0)
        } else {
            defaults.growth_factor
        };
        let bonus = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };

        Self {
            base_experience,
            growth_factor,
            level_up_bonus: LevelUpBonus {
                health: bonus(self.level_up_bonus.health),
                mana: bonus(self.level_up_bonus.mana),
            },
        }
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            base_experience: 100.0,
            growth_factor: 1.5,
            level_up_bonus: LevelUpBonus::default(),
        }
    }
}

/// Top-level game configuration document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Player tunables; `None` leaves the player's stats inert
    pub player: Option<PlayerConfig>,
    /// Experience curve
    pub progression: ProgressionConfig,
    /// Weapon equipped when the player spawns
    pub default_weapon: Option<WeaponDescriptor>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: Some(PlayerConfig::default()),
            progression: ProgressionConfig::default(),
            default_weapon: Some(WeaponDescriptor::default()),
        }
    }
}

impl GameConfig {
    /// Load from a `.ron` or `.json` file
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = load_document(path)?;
        Ok(config.sanitized())
    }

    /// Parse from a RON string
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid configuration
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            ron::from_str(text).map_err(|e| ConfigError::DeserializeError(e.to_string()))?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        self.player = self.player.map(PlayerConfig::sanitized);
        self.progression = self.progression.sanitized();
        self
    }
}

/// Read a configuration document, picking the format from the file extension.
///
/// `.json` files are parsed as JSON, everything else as RON.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or malformed
pub fn load_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::Missing(path.display().to_string()));
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).map_err(|e| ConfigError::DeserializeError(e.to_string()))
    } else {
        ron::from_str(&content).map_err(|e| ConfigError::DeserializeError(e.to_string()))
    }
}

/// Errors that can occur while loading configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration asset does not exist
    Missing(String),
    /// IO error
    IoError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing(path) => write!(f, "Missing configuration: {path}"),
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}
