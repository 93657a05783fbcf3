mod engine;
pub mod scheduler;
mod state;

pub use engine::StreakEngine;
pub use scheduler::{
    needs_daily_reset, needs_streak_reset, next_daily_reset_at, streak_deadline, ResetPolicy,
    STREAK_ABANDONMENT_HOURS,
};
pub use state::{DisplayState, StreakSnapshot, StreakStatus};
