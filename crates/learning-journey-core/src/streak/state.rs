use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::day_key::DayKey;
use crate::day_log::{DayLog, DayOutcome};
use crate::goal::DurationClass;

/// What today's action area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[default]
    ReadyToLog,
    LoggedLearnedToday,
    LoggedFrozenToday,
}

/// Everything the persistence collaborator stores for one engine.
///
/// The freeze quota is deliberately absent: it is derived from
/// `duration_class` when the snapshot is restored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSnapshot {
    pub topic: String,
    pub duration_class: DurationClass,
    pub days_learned: u32,
    pub days_frozen: u32,
    #[serde(default)]
    pub day_log: DayLog,
    #[serde(default)]
    pub last_logged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub display_state: DisplayState,
}

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStatus {
    pub topic: String,
    pub duration_class: DurationClass,
    pub today: DayKey,
    pub display_state: DisplayState,
    pub days_learned: u32,
    pub days_frozen: u32,
    pub freeze_quota: u32,
    pub freezes_remaining: u32,
    pub target_days: u32,
    pub goal_complete: bool,
    pub can_log_learned: bool,
    pub can_log_frozen: bool,
    pub today_outcome: DayOutcome,
    pub last_logged_at: Option<DateTime<Utc>>,
    /// Instant after which inactivity forfeits the streak.
    pub streak_deadline: Option<DateTime<Utc>>,
}
