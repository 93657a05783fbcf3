mod config;
pub mod database;

pub use config::{CalendarConfig, Config, GoalDefaults, StreakConfig};
pub use database::{Database, EventRecord};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::streak::StreakSnapshot;

/// Durable home for the engine snapshot.
///
/// The engine itself never touches storage; hosts load a snapshot at session
/// start and save one after every command.
pub trait SnapshotStore {
    fn load_snapshot(&self) -> Result<Option<StreakSnapshot>>;
    fn save_snapshot(&self, snapshot: &StreakSnapshot) -> Result<()>;
}

/// Returns `~/.config/learning-journey[-dev]/` based on LEARNING_JOURNEY_ENV.
///
/// Set LEARNING_JOURNEY_ENV=dev to use development data directory, or
/// LEARNING_JOURNEY_DATA_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the data directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("LEARNING_JOURNEY_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env =
                std::env::var("LEARNING_JOURNEY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("learning-journey-dev")
            } else {
                base_dir.join("learning-journey")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
