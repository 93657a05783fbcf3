//! # Learning Journey Core Library
//!
//! This library provides the core logic for Learning Journey, a personal
//! habit tracker: the user picks a learning topic and a goal horizon, then
//! logs each day as learned or frozen. All behaviour lives here; the CLI is a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: A date-driven state machine that never reads the
//!   clock. The caller passes `now` to every command and calls `on_resume()`
//!   to catch up on daily and abandonment resets
//! - **Day Log**: Append-only map from calendar day to outcome
//! - **Storage**: SQLite snapshot/event storage and TOML configuration
//!
//! ## Key Components
//!
//! - [`StreakEngine`]: Core streak state machine
//! - [`DayLog`]: Per-day outcome record
//! - [`Database`]: Snapshot and event persistence
//! - [`Config`]: Application configuration management

pub mod day_key;
pub mod day_log;
pub mod error;
pub mod events;
pub mod goal;
pub mod storage;
pub mod streak;

pub use day_key::{day_key, DayKey};
pub use day_log::{DayLog, DayOutcome};
pub use error::{ConfigError, CoreError, DatabaseError, LogError, Result, ValidationError};
pub use events::{Event, ResetReason};
pub use goal::{derive_freeze_quota, DurationClass, GoalConfiguration};
pub use storage::{Config, Database, SnapshotStore};
pub use streak::{
    needs_daily_reset, needs_streak_reset, DisplayState, ResetPolicy, StreakEngine, StreakSnapshot,
    StreakStatus,
};
