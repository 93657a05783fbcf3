//! Learning goal configuration.
//!
//! A goal is a topic plus a duration class. The duration class alone decides
//! how many freezes the goal allows and how many learned days complete it, so
//! neither number is ever stored on its own.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Goal horizon chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationClass {
    #[default]
    Week,
    Month,
    Year,
}

impl DurationClass {
    pub const ALL: [DurationClass; 3] = [DurationClass::Week, DurationClass::Month, DurationClass::Year];

    /// Freezes available over the whole goal.
    pub fn freeze_quota(&self) -> u32 {
        match self {
            DurationClass::Week => 2,
            DurationClass::Month => 8,
            DurationClass::Year => 96,
        }
    }

    /// Learned days needed to complete the goal.
    pub fn target_days(&self) -> u32 {
        match self {
            DurationClass::Week => 7,
            DurationClass::Month => 30,
            DurationClass::Year => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DurationClass::Week => "week",
            DurationClass::Month => "month",
            DurationClass::Year => "year",
        }
    }

    /// Lenient parse for values arriving from outside the engine.
    ///
    /// Unrecognized input becomes `Week` and is reported with a warning.
    pub fn parse_or_default(value: &str) -> DurationClass {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(value, "unrecognized duration class, falling back to week");
            DurationClass::Week
        })
    }
}

/// Freeze quota for a duration class.
pub fn derive_freeze_quota(duration_class: DurationClass) -> u32 {
    duration_class.freeze_quota()
}

impl fmt::Display for DurationClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DurationClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(DurationClass::Week),
            "month" => Ok(DurationClass::Month),
            "year" => Ok(DurationClass::Year),
            _ => Err(ValidationError::InvalidValue {
                field: "duration_class".to_string(),
                message: format!("expected week, month or year, got '{s}'"),
            }),
        }
    }
}

/// Topic and horizon of the current learning goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalConfiguration {
    pub topic: String,
    pub duration_class: DurationClass,
}

impl GoalConfiguration {
    pub fn new(topic: impl Into<String>, duration_class: DurationClass) -> Self {
        Self {
            topic: topic.into(),
            duration_class,
        }
    }

    pub fn freeze_quota(&self) -> u32 {
        derive_freeze_quota(self.duration_class)
    }

    pub fn target_days(&self) -> u32 {
        self.duration_class.target_days()
    }
}

impl Default for GoalConfiguration {
    fn default() -> Self {
        Self::new("Swift", DurationClass::Week)
    }
}
