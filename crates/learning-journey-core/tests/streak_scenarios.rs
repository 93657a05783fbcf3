//! Integration tests for the streak engine driven through whole days.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use learning_journey_core::{
    DayOutcome, DisplayState, DurationClass, Event, GoalConfiguration, LogError, ResetReason,
    StreakEngine,
};

/// UTC+3, so local midnight is 21:00 UTC.
fn riyadh() -> FixedOffset {
    FixedOffset::east_opt(3 * 3600).unwrap()
}

/// Local wall-clock time in Riyadh as a UTC instant.
fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    riyadh()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap()
        .with_timezone(&Utc)
}

fn week_engine() -> StreakEngine<FixedOffset> {
    StreakEngine::new(GoalConfiguration::new("Swift", DurationClass::Week), riyadh())
}

#[test]
fn learn_rearm_then_abandon() {
    let mut engine = week_engine();
    assert_eq!(engine.freeze_quota(), 2);

    // Monday 09:00
    let monday = local(2025, 10, 27, 9, 0);
    engine.log_learned(monday).unwrap();
    assert_eq!(engine.days_learned(), 1);
    assert_eq!(engine.display_state(), DisplayState::LoggedLearnedToday);
    assert!(!engine.is_log_learned_available(monday));

    // Tuesday 00:01, just past local midnight
    let event = engine.on_resume(local(2025, 10, 28, 0, 1));
    assert!(matches!(event, Some(Event::DailyReset { .. })));
    assert_eq!(engine.display_state(), DisplayState::ReadyToLog);
    assert_eq!(engine.days_learned(), 1);

    // Wednesday 10:00, 49 hours after the last log
    let event = engine.on_resume(local(2025, 10, 29, 10, 0));
    assert_eq!(event, Some(Event::StreakReset { reason: ResetReason::Abandoned }));
    assert_eq!(engine.days_learned(), 0);
    assert!(engine.day_log().is_empty());
}

#[test]
fn local_midnight_not_utc_midnight_rearms() {
    let mut engine = week_engine();
    engine.log_learned(local(2025, 10, 27, 20, 0)).unwrap();

    // 23:30 local is still Monday even though UTC has not moved days either.
    assert_eq!(engine.on_resume(local(2025, 10, 27, 23, 30)), None);
    // 00:30 local Tuesday is 21:30 UTC Monday.
    let tuesday = local(2025, 10, 28, 0, 30);
    assert_eq!(tuesday.date_naive().to_string(), "2025-10-27");
    assert!(engine.on_resume(tuesday).is_some());
    assert!(engine.is_log_learned_available(tuesday));
    assert_eq!(engine.today(tuesday).to_string(), "2025-10-28");
}

#[test]
fn two_freezes_then_quota_exhausted() {
    let mut engine = week_engine();

    engine.log_frozen(local(2025, 10, 27, 9, 0)).unwrap();
    engine.on_resume(local(2025, 10, 28, 9, 0));
    engine.log_frozen(local(2025, 10, 28, 9, 0)).unwrap();
    assert_eq!(engine.days_frozen(), 2);

    let wednesday = local(2025, 10, 29, 9, 0);
    engine.on_resume(wednesday);
    assert!(!engine.is_log_frozen_available(wednesday));
    assert_eq!(
        engine.log_frozen(wednesday),
        Err(LogError::FreezeQuotaExhausted { used: 2, quota: 2 })
    );
    assert_eq!(engine.days_frozen(), 2);
}

#[test]
fn set_goal_after_progress_starts_over() {
    let mut engine = week_engine();
    for day in 0..5 {
        let now = local(2025, 10, 20, 9, 0) + chrono::Duration::days(day);
        engine.on_resume(now);
        engine.log_learned(now).unwrap();
    }
    assert_eq!(engine.days_learned(), 5);

    engine.set_goal("Rust", DurationClass::Month);
    assert_eq!(engine.freeze_quota(), 8);
    assert_eq!(engine.days_learned(), 0);
    assert!(engine.day_log().is_empty());
    assert_eq!(engine.topic(), "Rust");
}

#[test]
fn week_goal_completes_and_restarts() {
    let mut engine = week_engine();
    let start = local(2025, 10, 1, 8, 0);
    for day in 0..7 {
        let now = start + chrono::Duration::days(day);
        assert!(engine.on_resume(now).is_some() || day == 0);
        assert_eq!(engine.check_goal_completion(7), None);
        engine.log_learned(now).unwrap();
    }
    assert_eq!(
        engine.check_goal_completion(7),
        Some(Event::GoalCompleted { target_days: 7, days_learned: 7 })
    );

    engine.restart_same_goal();
    assert_eq!(engine.days_learned(), 0);
    assert_eq!(engine.day_log().count(DayOutcome::Learned), 7);
    assert!(!engine.is_goal_complete());
}

#[test]
fn freeze_keeps_streak_alive_across_a_gap() {
    let mut engine = week_engine();
    engine.log_learned(local(2025, 10, 27, 9, 0)).unwrap();
    // A freeze 31 hours later restarts the abandonment clock.
    let tuesday = local(2025, 10, 28, 16, 0);
    assert!(matches!(engine.on_resume(tuesday), Some(Event::DailyReset { .. })));
    engine.log_frozen(tuesday).unwrap();

    // 59 hours after the learned day, 28 after the freeze.
    let event = engine.on_resume(local(2025, 10, 29, 20, 0));
    assert!(matches!(event, Some(Event::DailyReset { .. })));
    assert_eq!(engine.days_learned(), 1);
    assert_eq!(engine.days_frozen(), 1);
}

#[test]
fn day_logged_event_carries_counters() {
    let mut engine = week_engine();
    let now = local(2025, 10, 27, 9, 0);
    let event = engine.log_learned(now).unwrap();
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "DayLogged");
    assert_eq!(json["day"], "2025-10-27");
    assert_eq!(json["outcome"], "learned");
    assert_eq!(json["days_learned"], 1);
    assert_eq!(json["days_frozen"], 0);
}
