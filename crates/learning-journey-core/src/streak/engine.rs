//! Streak engine implementation.
//!
//! The engine is a date-driven state machine. It owns no timer and never
//! reads the clock: every operation that depends on time takes `now`, and the
//! caller is responsible for calling `on_resume()` when the app wakes up or on
//! a periodic tick.
//!
//! ## State Transitions
//!
//! ```text
//! ReadyToLog -> LoggedLearnedToday -> (next day) -> ReadyToLog
//! ReadyToLog -> LoggedFrozenToday  -> (next day) -> ReadyToLog
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = StreakEngine::new(GoalConfiguration::default(), Local);
//! engine.log_learned(Utc::now())?;
//! // On app foreground or a timer:
//! engine.on_resume(Utc::now()); // Returns Some(Event) when a reset fired
//! ```

use chrono::{DateTime, Local, TimeZone, Utc};

use super::scheduler::{self, ResetPolicy};
use super::state::{DisplayState, StreakSnapshot, StreakStatus};
use crate::day_key::{day_key, DayKey};
use crate::day_log::{DayLog, DayOutcome};
use crate::error::{LogError, ValidationError};
use crate::events::{Event, ResetReason};
use crate::goal::{DurationClass, GoalConfiguration};

/// Core streak engine.
///
/// One instance per user session. Mutators take `&mut self`; hosts that reach
/// the engine from several threads must put it behind a single lock.
#[derive(Debug, Clone)]
pub struct StreakEngine<Tz: TimeZone = Local> {
    goal: GoalConfiguration,
    day_log: DayLog,
    days_learned: u32,
    days_frozen: u32,
    display_state: DisplayState,
    last_logged_at: Option<DateTime<Utc>>,
    policy: ResetPolicy,
    zone: Tz,
}

impl<Tz: TimeZone> StreakEngine<Tz> {
    /// Create a fresh engine for `goal`, keyed to days in `zone`.
    pub fn new(goal: GoalConfiguration, zone: Tz) -> Self {
        Self {
            goal,
            day_log: DayLog::new(),
            days_learned: 0,
            days_frozen: 0,
            display_state: DisplayState::ReadyToLog,
            last_logged_at: None,
            policy: ResetPolicy::default(),
            zone,
        }
    }

    pub fn with_policy(mut self, policy: ResetPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rebuild an engine from persisted state.
    ///
    /// # Errors
    /// Returns an error if the snapshot uses more freezes than its duration
    /// class allows.
    pub fn from_snapshot(snapshot: StreakSnapshot, zone: Tz) -> Result<Self, ValidationError> {
        let goal = GoalConfiguration::new(snapshot.topic, snapshot.duration_class);
        let quota = goal.freeze_quota();
        if snapshot.days_frozen > quota {
            return Err(ValidationError::FreezeQuotaExceeded {
                frozen: snapshot.days_frozen,
                quota,
            });
        }
        Ok(Self {
            goal,
            day_log: snapshot.day_log,
            days_learned: snapshot.days_learned,
            days_frozen: snapshot.days_frozen,
            display_state: snapshot.display_state,
            last_logged_at: snapshot.last_logged_at,
            policy: ResetPolicy::default(),
            zone,
        })
    }

    pub fn snapshot(&self) -> StreakSnapshot {
        StreakSnapshot {
            topic: self.goal.topic.clone(),
            duration_class: self.goal.duration_class,
            days_learned: self.days_learned,
            days_frozen: self.days_frozen,
            day_log: self.day_log.clone(),
            last_logged_at: self.last_logged_at,
            display_state: self.display_state,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn goal(&self) -> &GoalConfiguration {
        &self.goal
    }

    pub fn topic(&self) -> &str {
        &self.goal.topic
    }

    pub fn duration_class(&self) -> DurationClass {
        self.goal.duration_class
    }

    pub fn freeze_quota(&self) -> u32 {
        self.goal.freeze_quota()
    }

    pub fn freezes_remaining(&self) -> u32 {
        self.freeze_quota().saturating_sub(self.days_frozen)
    }

    pub fn days_learned(&self) -> u32 {
        self.days_learned
    }

    pub fn days_frozen(&self) -> u32 {
        self.days_frozen
    }

    pub fn display_state(&self) -> DisplayState {
        self.display_state
    }

    pub fn last_logged_at(&self) -> Option<DateTime<Utc>> {
        self.last_logged_at
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }

    pub fn zone(&self) -> &Tz {
        &self.zone
    }

    pub fn day_log(&self) -> &DayLog {
        &self.day_log
    }

    pub fn outcome_on(&self, day: &DayKey) -> DayOutcome {
        self.day_log.outcome(day)
    }

    pub fn today(&self, now: DateTime<Utc>) -> DayKey {
        day_key(now, &self.zone)
    }

    pub fn is_log_learned_available(&self, now: DateTime<Utc>) -> bool {
        !self.day_log.is_logged(&self.today(now))
    }

    pub fn is_log_frozen_available(&self, now: DateTime<Utc>) -> bool {
        self.is_log_learned_available(now) && self.days_frozen < self.freeze_quota()
    }

    /// Outcomes for the Sunday-to-Saturday week containing `now`.
    pub fn week_outcomes(&self, now: DateTime<Utc>) -> Vec<(DayKey, DayOutcome)> {
        self.today(now)
            .week()
            .into_iter()
            .map(|day| (day, self.day_log.outcome(&day)))
            .collect()
    }

    /// `Some(Event::GoalCompleted)` once `target_days` learned days are logged.
    ///
    /// Completion never resets anything; the host decides whether to call
    /// `set_goal` or `restart_same_goal`.
    pub fn check_goal_completion(&self, target_days: u32) -> Option<Event> {
        (self.days_learned >= target_days).then_some(Event::GoalCompleted {
            target_days,
            days_learned: self.days_learned,
        })
    }

    pub fn is_goal_complete(&self) -> bool {
        self.check_goal_completion(self.goal.target_days()).is_some()
    }

    pub fn next_daily_reset_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        scheduler::next_daily_reset_at(now, &self.zone)
    }

    pub fn streak_deadline(&self) -> Option<DateTime<Utc>> {
        scheduler::streak_deadline(self.last_logged_at, self.policy.abandonment_window())
    }

    /// Build the full read model for the presentation layer.
    pub fn status(&self, now: DateTime<Utc>) -> StreakStatus {
        let today = self.today(now);
        StreakStatus {
            topic: self.goal.topic.clone(),
            duration_class: self.goal.duration_class,
            today,
            display_state: self.display_state,
            days_learned: self.days_learned,
            days_frozen: self.days_frozen,
            freeze_quota: self.freeze_quota(),
            freezes_remaining: self.freezes_remaining(),
            target_days: self.goal.target_days(),
            goal_complete: self.is_goal_complete(),
            can_log_learned: self.is_log_learned_available(now),
            can_log_frozen: self.is_log_frozen_available(now),
            today_outcome: self.day_log.outcome(&today),
            last_logged_at: self.last_logged_at,
            streak_deadline: self.streak_deadline(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Mark today as learned.
    ///
    /// # Errors
    /// `LogError::AlreadyLogged` if today already has an outcome. State is
    /// left untouched.
    pub fn log_learned(&mut self, now: DateTime<Utc>) -> Result<Event, LogError> {
        let today = self.today(now);
        self.day_log
            .record_outcome(today, DayOutcome::Learned)
            .inspect_err(|err| tracing::debug!(%err, "log learned rejected"))?;
        self.days_learned += 1;
        self.display_state = DisplayState::LoggedLearnedToday;
        self.last_logged_at = Some(now);
        Ok(self.day_logged(today, DayOutcome::Learned, now))
    }

    /// Spend one freeze on today.
    ///
    /// # Errors
    /// `LogError::AlreadyLogged` if today already has an outcome, otherwise
    /// `LogError::FreezeQuotaExhausted` when no freezes remain. State is left
    /// untouched either way.
    pub fn log_frozen(&mut self, now: DateTime<Utc>) -> Result<Event, LogError> {
        let today = self.today(now);
        let quota = self.freeze_quota();
        if self.day_log.is_logged(&today) {
            tracing::debug!(day = %today, "log frozen rejected: already logged");
            return Err(LogError::AlreadyLogged { day: today });
        }
        if self.days_frozen >= quota {
            tracing::debug!(used = self.days_frozen, quota, "log frozen rejected: quota exhausted");
            return Err(LogError::FreezeQuotaExhausted {
                used: self.days_frozen,
                quota,
            });
        }
        self.day_log.record_outcome(today, DayOutcome::Frozen)?;
        self.days_frozen += 1;
        self.display_state = DisplayState::LoggedFrozenToday;
        self.last_logged_at = Some(now);
        Ok(self.day_logged(today, DayOutcome::Frozen, now))
    }

    /// Replace the goal. Changing the goal forfeits all progress.
    pub fn set_goal(&mut self, topic: impl Into<String>, duration_class: DurationClass) -> Event {
        self.goal = GoalConfiguration::new(topic, duration_class);
        self.clear_progress();
        tracing::info!(
            topic = %self.goal.topic,
            duration = %duration_class,
            freeze_quota = self.freeze_quota(),
            "goal set"
        );
        Event::GoalSet {
            topic: self.goal.topic.clone(),
            duration_class,
            freeze_quota: self.freeze_quota(),
        }
    }

    /// Start the same goal again after completing it.
    ///
    /// Only the learned-day counter goes back to zero; the day log and the
    /// freezes already spent carry over.
    pub fn restart_same_goal(&mut self) -> Event {
        self.days_learned = 0;
        tracing::info!(topic = %self.goal.topic, "goal restarted");
        Event::GoalRestarted
    }

    /// Forfeit the streak: counters to zero, day log emptied.
    pub fn reset_streak(&mut self, reason: ResetReason) -> Event {
        let days_learned = self.days_learned;
        self.clear_progress();
        tracing::info!(?reason, days_learned, "streak reset");
        Event::StreakReset { reason }
    }

    /// Catch up on time-driven resets.
    ///
    /// Abandonment is checked first and supersedes the daily re-arm. Calling
    /// this again with the same `now` returns `None`.
    pub fn on_resume(&mut self, now: DateTime<Utc>) -> Option<Event> {
        if scheduler::needs_streak_reset(now, self.last_logged_at, self.policy.abandonment_window()) {
            return Some(self.reset_streak(ResetReason::Abandoned));
        }
        if self.display_state != DisplayState::ReadyToLog
            && scheduler::needs_daily_reset(now, self.last_logged_at, &self.zone)
        {
            self.display_state = DisplayState::ReadyToLog;
            let day = self.today(now);
            tracing::info!(%day, "daily reset");
            return Some(Event::DailyReset { day });
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn clear_progress(&mut self) {
        self.days_learned = 0;
        self.days_frozen = 0;
        self.day_log.clear();
        self.display_state = DisplayState::ReadyToLog;
        self.last_logged_at = None;
    }

    fn day_logged(&self, day: DayKey, outcome: DayOutcome, at: DateTime<Utc>) -> Event {
        Event::DayLogged {
            day,
            outcome,
            days_learned: self.days_learned,
            days_frozen: self.days_frozen,
            at,
        }
    }
}
