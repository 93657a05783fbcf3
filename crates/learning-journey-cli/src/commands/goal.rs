use chrono::{DateTime, Utc};
use clap::Subcommand;
use learning_journey_core::DurationClass;
use serde::Serialize;

use super::{print_json, CliResult, Session};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Replace the goal. Forfeits current progress.
    Set {
        /// What you are learning
        topic: String,
        /// Goal horizon: week, month or year
        #[arg(long, default_value = "week")]
        duration: String,
    },
    /// Print the current goal
    Show,
    /// Start the same goal again (learned days back to zero)
    Restart,
}

#[derive(Serialize)]
struct GoalView<'a> {
    topic: &'a str,
    duration_class: DurationClass,
    freeze_quota: u32,
    target_days: u32,
}

pub fn run(action: GoalAction, now: DateTime<Utc>) -> CliResult {
    let mut session = Session::open(now)?;
    session.catch_up();

    match action {
        GoalAction::Set { topic, duration } => {
            let topic = topic.trim();
            if topic.is_empty() {
                return Err("topic must not be empty".into());
            }
            let duration: DurationClass = duration.parse()?;
            let event = session.engine.set_goal(topic, duration);
            print_json(&session.record(event))?;
        }
        GoalAction::Show => {
            let goal = session.engine.goal();
            print_json(&GoalView {
                topic: &goal.topic,
                duration_class: goal.duration_class,
                freeze_quota: goal.freeze_quota(),
                target_days: goal.target_days(),
            })?;
        }
        GoalAction::Restart => {
            let event = session.engine.restart_same_goal();
            print_json(&session.record(event))?;
        }
    }

    session.save()
}
