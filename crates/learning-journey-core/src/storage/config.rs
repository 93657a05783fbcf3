//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - The goal a fresh engine starts with
//! - The streak abandonment window
//! - The calendar zone used for day keys
//!
//! Configuration is stored at `~/.config/learning-journey/config.toml`.

use std::path::{Path, PathBuf};

use chrono::{FixedOffset, Local, Offset};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::ConfigError;
use crate::goal::{DurationClass, GoalConfiguration};
use crate::streak::{ResetPolicy, STREAK_ABANDONMENT_HOURS};

/// Goal used when no snapshot exists yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDefaults {
    #[serde(default = "default_topic")]
    pub topic: String,
    /// Kept as text so a hand-edited file with a typo still loads.
    #[serde(default = "default_duration")]
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakConfig {
    #[serde(default = "default_abandonment_hours")]
    pub abandonment_hours: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Fixed UTC offset for day keys. Absent means the system's local offset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/learning-journey/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub goal: GoalDefaults,
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

fn default_topic() -> String {
    "Swift".into()
}
fn default_duration() -> String {
    DurationClass::Week.as_str().into()
}
fn default_abandonment_hours() -> u32 {
    STREAK_ABANDONMENT_HOURS
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            topic: default_topic(),
            duration: default_duration(),
        }
    }
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self {
            abandonment_hours: default_abandonment_hours(),
        }
    }
}

/// Keys backed by an `Option`; setting them to `""` or `"none"` clears them.
const OPTIONAL_KEYS: &[&str] = &["calendar.utc_offset_minutes"];

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().is_none() || key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let clears = matches!(value, "" | "none") && OPTIONAL_KEYS.contains(&key);
                let new_value = match existing {
                    _ if clears => serde_json::Value::Null,
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Null => value
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .unwrap_or_else(|_| serde_json::Value::String(value.into())),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot set a whole section".into()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value has the wrong type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.streak.abandonment_hours == 0 {
            return Err(ConfigError::InvalidValue {
                key: "streak.abandonment_hours".into(),
                message: "must be at least 1".into(),
            });
        }
        if self.calendar.utc_offset_minutes.is_some() {
            self.zone()?;
        }
        Ok(())
    }

    /// Goal for a fresh engine. An unknown duration falls back to a week.
    pub fn goal_configuration(&self) -> GoalConfiguration {
        GoalConfiguration::new(
            self.goal.topic.clone(),
            DurationClass::parse_or_default(&self.goal.duration),
        )
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        ResetPolicy::with_abandonment_hours(self.streak.abandonment_hours)
    }

    /// Zone used for day keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured offset is outside ±24 hours.
    pub fn zone(&self) -> Result<FixedOffset, ConfigError> {
        match self.calendar.utc_offset_minutes {
            Some(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "calendar.utc_offset_minutes".into(),
                    message: format!("{minutes} is not a valid UTC offset"),
                }),
            None => Ok(Local::now().offset().fix()),
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!(%err, "using default configuration");
            Self::default()
        })
    }
}
