//! Game configuration: roster, wheel layout, starting puzzles, and timings.
//!
//! Defaults come from [`crate::game::constants`]. A JSON file may replace any
//! section, and `WHEEL_*` environment variables override individual values.

use serde::{Deserialize, Serialize};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use crate::game::{
    RoundSettings, RoundState,
    constants::{
        DEFAULT_NOTIFICATION_DELAY, DEFAULT_PLAYER_NAMES, DEFAULT_PUZZLES, DEFAULT_SPIN_DURATION,
    },
    entities::{Puzzle, PuzzleId, SectorKind, WheelSector},
};

/// Delays, in milliseconds
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    pub spin_ms: u64,
    pub notification_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            spin_ms: DEFAULT_SPIN_DURATION.as_millis() as u64,
            notification_ms: DEFAULT_NOTIFICATION_DELAY.as_millis() as u64,
        }
    }
}

/// Complete startup configuration for one match
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct GameConfig {
    /// Display names in turn order
    pub players: Vec<String>,
    /// Wheel sectors in wheel order
    pub sectors: Vec<WheelSector>,
    /// Initial puzzle queue
    pub puzzles: Vec<Puzzle>,
    pub timing: TimingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: DEFAULT_PLAYER_NAMES.iter().map(ToString::to_string).collect(),
            sectors: WheelSector::default_wheel(),
            puzzles: DEFAULT_PUZZLES
                .iter()
                .map(|&(id, category, phrase)| Puzzle::new(PuzzleId::new(id), category, phrase))
                .collect(),
            timing: TimingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON document. Missing sections keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the document is not valid JSON for this shape
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    ///
    /// Returns error if the file can't be read or parsed
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Defaults or `path`, then environment overrides, then validation.
    ///
    /// # Errors
    ///
    /// Returns error if the file is unreadable or the result is invalid
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply `WHEEL_PLAYERS`, `WHEEL_SPIN_MS` and `WHEEL_NOTIFICATION_MS`
    /// from `lookup`. Unparseable numbers keep the current value.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(names) = lookup("WHEEL_PLAYERS") {
            self.players = names
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string)
                .collect();
        }
        self.timing.spin_ms = parse_or(lookup("WHEEL_SPIN_MS"), self.timing.spin_ms);
        self.timing.notification_ms =
            parse_or(lookup("WHEEL_NOTIFICATION_MS"), self.timing.notification_ms);
    }

    /// # Errors
    ///
    /// Returns the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players.is_empty() {
            return Err(ConfigError::Invalid {
                var: "players".to_string(),
                reason: "Must name at least one player".to_string(),
            });
        }

        if self.sectors.is_empty() {
            return Err(ConfigError::Invalid {
                var: "sectors".to_string(),
                reason: "The wheel needs at least one sector".to_string(),
            });
        }

        if let Some(sector) = self
            .sectors
            .iter()
            .find(|s| s.kind == SectorKind::Points { value: 0 })
        {
            return Err(ConfigError::Invalid {
                var: "sectors".to_string(),
                reason: format!("Points sector '{}' must be worth more than 0", sector.label),
            });
        }

        if self.timing.spin_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "WHEEL_SPIN_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.timing.notification_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "WHEEL_NOTIFICATION_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn round_settings(&self) -> RoundSettings {
        RoundSettings {
            spin_duration: Duration::from_millis(self.timing.spin_ms),
            notification_delay: Duration::from_millis(self.timing.notification_ms),
        }
    }
}

impl From<&GameConfig> for RoundState {
    fn from(config: &GameConfig) -> Self {
        let names: Vec<&str> = config.players.iter().map(String::as_str).collect();
        RoundState::new(
            RoundState::roster(&names),
            config.puzzles.clone(),
            config.round_settings(),
        )
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },

    #[error("Can't read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Json(#[from] serde_json::Error),
}

fn parse_or<T>(value: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
