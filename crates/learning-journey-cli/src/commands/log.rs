use chrono::{DateTime, Utc};
use clap::Subcommand;

use super::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum LogAction {
    /// Mark today as learned
    Learned,
    /// Spend a freeze on today
    Frozen,
}

pub fn run(action: LogAction, now: DateTime<Utc>) -> CliResult {
    let mut session = Session::open(now)?;
    session.catch_up();

    let learned = matches!(action, LogAction::Learned);
    let result = match action {
        LogAction::Learned => session.engine.log_learned(now),
        LogAction::Frozen => session.engine.log_frozen(now),
    };

    // A rejected log changes nothing, but a reset applied by catch_up must
    // still be stored.
    let event = match result {
        Ok(event) => session.record(event),
        Err(err) => {
            session.save()?;
            return Err(err.into());
        }
    };
    print_json(&event)?;

    // Only a learned day moves the count toward the target.
    if learned {
        let target_days = session.engine.goal().target_days();
        if let Some(completed) = session.engine.check_goal_completion(target_days) {
            print_json(&session.record(completed))?;
        }
    }

    session.save()
}
