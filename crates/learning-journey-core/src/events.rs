use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::day_key::DayKey;
use crate::day_log::DayOutcome;
use crate::goal::DurationClass;

/// Every state change in the engine produces an Event.
/// Hosts render from them or append them to their own log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A new goal replaced the old one and the streak started over.
    GoalSet {
        topic: String,
        duration_class: DurationClass,
        freeze_quota: u32,
    },
    DayLogged {
        day: DayKey,
        outcome: DayOutcome,
        days_learned: u32,
        days_frozen: u32,
        at: DateTime<Utc>,
    },
    /// A new calendar day began; today's actions are available again.
    DailyReset {
        day: DayKey,
    },
    StreakReset {
        reason: ResetReason,
    },
    GoalCompleted {
        target_days: u32,
        days_learned: u32,
    },
    /// Learned days went back to zero under the same goal.
    GoalRestarted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetReason {
    /// No log for longer than the abandonment window.
    Abandoned,
    /// Requested by the host.
    Manual,
}
