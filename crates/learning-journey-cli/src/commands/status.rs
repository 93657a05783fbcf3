use chrono::{DateTime, Utc};
use learning_journey_core::{DayOutcome, DisplayState, ResetReason, StreakStatus};
use serde::Serialize;

use super::{print_json, CliResult, Session};

#[derive(Serialize)]
struct WeekDay {
    day: String,
    outcome: DayOutcome,
    today: bool,
}

pub fn run_status(json: bool, now: DateTime<Utc>) -> CliResult {
    let mut session = Session::open(now)?;
    session.catch_up();
    let status = session.engine.status(now);
    if json {
        print_json(&status)?;
    } else {
        print_status(&status);
    }
    session.save()
}

fn print_status(status: &StreakStatus) {
    let today = match status.display_state {
        DisplayState::ReadyToLog => "not logged yet",
        DisplayState::LoggedLearnedToday => "learned",
        DisplayState::LoggedFrozenToday => "frozen",
    };
    println!("Learning {} ({})", status.topic, status.duration_class);
    println!("Today {}: {today}", status.today);
    println!("Days learned: {} of {}", status.days_learned, status.target_days);
    println!(
        "Freezes: {} out of {} used",
        status.days_frozen, status.freeze_quota
    );
    if status.goal_complete {
        println!("Goal completed! Restart it or set a new one.");
    }
    if let Some(deadline) = status.streak_deadline {
        println!("Log again before {} to keep the streak", deadline.to_rfc3339());
    }
}

/// Prints the reset that was applied, or `null`.
pub fn run_resume(now: DateTime<Utc>) -> CliResult {
    let mut session = Session::open(now)?;
    let event = session.catch_up();
    print_json(&event)?;
    session.save()
}

pub fn run_week(now: DateTime<Utc>) -> CliResult {
    let mut session = Session::open(now)?;
    session.catch_up();
    let today = session.engine.today(now);
    let week: Vec<WeekDay> = session
        .engine
        .week_outcomes(now)
        .into_iter()
        .map(|(day, outcome)| WeekDay {
            day: day.to_string(),
            outcome,
            today: day == today,
        })
        .collect();
    print_json(&week)?;
    session.save()
}

pub fn run_reset(now: DateTime<Utc>) -> CliResult {
    let mut session = Session::open(now)?;
    let event = session.engine.reset_streak(ResetReason::Manual);
    print_json(&session.record(event))?;
    session.save()
}

pub fn run_history(limit: u32) -> CliResult {
    let session = Session::open(Utc::now())?;
    let records = session.db().recent_events(limit)?;
    print_json(&records)
}
