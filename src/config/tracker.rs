//! Tracker settings loading from config.toml
//!
//! Every field has a default, so a missing file or a file without a
//! `[tracker]` table is not an error. Values that would break the water cap
//! or the rollover timer are rejected at load time.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tracker tuning
    pub tracker: TrackerSettings,
}

/// Goals and timers used while a profile has no value of its own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Water goal (ml) while the profile goal is unset
    pub default_water_goal_ml: u32,
    /// Calorie goal (kcal) while the profile goal is unset
    pub default_calorie_goal: u32,
    /// Water cap as a multiple of the effective water goal
    pub water_cap_factor: f64,
    /// Period of the background rollover check, in seconds
    pub rollover_check_secs: u64,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            default_water_goal_ml: 2000,
            default_calorie_goal: 2000,
            water_cap_factor: 1.5,
            rollover_check_secs: 60,
        }
    }
}

impl TrackerSettings {
    /// Water goal in effect for a profile goal (0 = unset).
    #[must_use]
    pub const fn effective_water_goal(&self, profile_goal: u32) -> u32 {
        if profile_goal > 0 {
            profile_goal
        } else {
            self.default_water_goal_ml
        }
    }

    /// Calorie goal in effect for a profile goal (0 = unset).
    #[must_use]
    pub const fn effective_calorie_goal(&self, profile_goal: u32) -> u32 {
        if profile_goal > 0 {
            profile_goal
        } else {
            self.default_calorie_goal
        }
    }

    /// Highest value the water total may reach for a profile goal.
    // Cast safety: factor is validated positive and finite, goals are small.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn water_cap(&self, profile_goal: u32) -> u32 {
        (f64::from(self.effective_water_goal(profile_goal)) * self.water_cap_factor).round() as u32
    }

    /// Rollover timer period.
    #[must_use]
    pub const fn rollover_period(&self) -> Duration {
        Duration::from_secs(self.rollover_check_secs)
    }

    /// Rejects values the tracker cannot run with.
    ///
    /// # Errors
    /// Returns [`Error::Config`] for a cap factor below 1 or non-finite, or a
    /// zero timer period or default goal.
    pub fn validate(&self) -> Result<()> {
        if !self.water_cap_factor.is_finite() || self.water_cap_factor < 1.0 {
            return Err(Error::Config {
                message: format!(
                    "water_cap_factor must be at least 1.0, got {}",
                    self.water_cap_factor
                ),
            });
        }
        if self.rollover_check_secs == 0 {
            return Err(Error::Config {
                message: "rollover_check_secs must be greater than zero".to_string(),
            });
        }
        if self.default_water_goal_ml == 0 || self.default_calorie_goal == 0 {
            return Err(Error::Config {
                message: "default goals must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses and validates settings from TOML text.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a value fails validation.
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.tracker.validate()?;
    Ok(config)
}

/// Loads settings from a TOML file; a missing file yields defaults.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid
/// - A value fails validation
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No settings file at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads settings from `AAHAR_CONFIG`, or ./config.toml when unset.
///
/// # Errors
/// See [`load_config`].
pub fn load_default_config() -> Result<Config> {
    let path = std::env::var("AAHAR_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r"
            [tracker]
            default_water_goal_ml = 2500
            default_calorie_goal = 1800
            water_cap_factor = 2.0
            rollover_check_secs = 30
        ";

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.tracker.default_water_goal_ml, 2500);
        assert_eq!(config.tracker.default_calorie_goal, 1800);
        assert_eq!(config.tracker.water_cap_factor, 2.0);
        assert_eq!(config.tracker.rollover_period(), Duration::from_secs(30));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = parse_config("[tracker]\ndefault_calorie_goal = 2200\n").unwrap();
        assert_eq!(config.tracker.default_calorie_goal, 2200);
        assert_eq!(config.tracker.default_water_goal_ml, 2000);
        assert_eq!(config.tracker.water_cap_factor, 1.5);

        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config("definitely/not/here/config.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(parse_config("[tracker]\nwater_cap_factor = 0.5\n").is_err());
        assert!(parse_config("[tracker]\nrollover_check_secs = 0\n").is_err());
        assert!(parse_config("[tracker]\ndefault_water_goal_ml = 0\n").is_err());
        assert!(parse_config("[tracker\n").is_err());
    }

    #[test]
    fn test_water_cap_follows_effective_goal() {
        let settings = TrackerSettings::default();
        assert_eq!(settings.water_cap(0), 3000);
        assert_eq!(settings.water_cap(2100), 3150);
        assert_eq!(settings.effective_calorie_goal(0), 2000);
        assert_eq!(settings.effective_calorie_goal(2037), 2037);
    }
}
