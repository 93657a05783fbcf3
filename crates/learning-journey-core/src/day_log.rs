//! Append-only record of what happened on each calendar day.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::day_key::DayKey;
use crate::error::LogError;

/// Outcome of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOutcome {
    #[default]
    Unset,
    Learned,
    Frozen,
}

impl DayOutcome {
    pub fn is_set(&self) -> bool {
        !matches!(self, DayOutcome::Unset)
    }
}

/// Day key to outcome map.
///
/// Only set outcomes are stored; a missing key reads as [`DayOutcome::Unset`].
/// Once a day holds an outcome it can't be changed, only cleared together
/// with the whole log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<DayKey, DayOutcome>",
    into = "BTreeMap<DayKey, DayOutcome>"
)]
pub struct DayLog {
    entries: BTreeMap<DayKey, DayOutcome>,
}

impl From<BTreeMap<DayKey, DayOutcome>> for DayLog {
    fn from(mut entries: BTreeMap<DayKey, DayOutcome>) -> Self {
        entries.retain(|_, outcome| outcome.is_set());
        Self { entries }
    }
}

impl From<DayLog> for BTreeMap<DayKey, DayOutcome> {
    fn from(log: DayLog) -> Self {
        log.entries
    }
}

impl DayLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self, key: &DayKey) -> DayOutcome {
        self.entries.get(key).copied().unwrap_or_default()
    }

    pub fn is_logged(&self, key: &DayKey) -> bool {
        self.outcome(key).is_set()
    }

    /// Record `outcome` for `key`.
    ///
    /// Fails if the day already has an outcome. Recording `Unset` stores
    /// nothing and leaves the day loggable.
    pub fn record_outcome(&mut self, key: DayKey, outcome: DayOutcome) -> Result<(), LogError> {
        if self.is_logged(&key) {
            return Err(LogError::AlreadyLogged { day: key });
        }
        if outcome.is_set() {
            self.entries.insert(key, outcome);
        }
        Ok(())
    }

    pub fn count(&self, outcome: DayOutcome) -> usize {
        self.entries.values().filter(|o| **o == outcome).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Logged days in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &DayOutcome)> {
        self.entries.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
