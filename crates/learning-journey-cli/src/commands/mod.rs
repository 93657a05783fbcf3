pub mod config;
pub mod goal;
pub mod log;
pub mod status;

use chrono::{DateTime, FixedOffset, Utc};
use learning_journey_core::storage::SnapshotStore;
use learning_journey_core::{Config, Database, Event, StreakEngine};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// One CLI invocation's view of the engine.
///
/// Loads the stored snapshot (or starts from the configured goal), and
/// remembers every event so they land in the history on `save()`.
pub struct Session {
    db: Database,
    pub engine: StreakEngine<FixedOffset>,
    pub now: DateTime<Utc>,
    pending: Vec<Event>,
}

impl Session {
    pub fn open(now: DateTime<Utc>) -> CliResult<Self> {
        let config = Config::load()?;
        let zone = config.zone()?;
        let db = Database::open()?;
        let engine = match db.load_snapshot()? {
            Some(snapshot) => StreakEngine::from_snapshot(snapshot, zone)?,
            None => StreakEngine::new(config.goal_configuration(), zone),
        }
        .with_policy(config.reset_policy());
        tracing::debug!(topic = engine.topic(), %now, "session opened");

        Ok(Self {
            db,
            engine,
            now,
            pending: Vec::new(),
        })
    }

    /// Apply pending time-driven resets, as a host does when it wakes up.
    pub fn catch_up(&mut self) -> Option<Event> {
        let event = self.engine.on_resume(self.now)?;
        self.pending.push(event.clone());
        Some(event)
    }

    pub fn record(&mut self, event: Event) -> Event {
        self.pending.push(event.clone());
        event
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn save(&mut self) -> CliResult {
        self.db.save_snapshot(&self.engine.snapshot())?;
        for event in self.pending.drain(..) {
            self.db.append_event(&event, self.now)?;
        }
        Ok(())
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
