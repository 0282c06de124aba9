//! Per-group change log of operator edits.

use crate::models::outcome::MatchResult;
use crate::models::team::{Counter, TeamId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// What the operator changed in a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    CounterEdited {
        team_id: TeamId,
        team_name: String,
        counter: Counter,
        old: u32,
        new: u32,
    },
    MatchAdded {
        home_id: TeamId,
        home_name: String,
        away_id: TeamId,
        away_name: String,
        result: MatchResult,
    },
    GroupReset,
}

impl fmt::Display for ChangeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeEvent::CounterEdited {
                team_name,
                counter,
                old,
                new,
                ..
            } => write!(f, "{}: {} {} → {}", team_name, counter.key(), old, new),
            ChangeEvent::MatchAdded {
                home_name,
                away_name,
                result,
                ..
            } => write!(f, "Match added: {} vs {} → {}", home_name, away_name, result),
            ChangeEvent::GroupReset => write!(f, "Group reset to loaded values"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChangeEntry {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: ChangeEvent,
    /// Human-readable form of `event`.
    pub message: String,
}

impl ChangeEntry {
    pub fn new(event: ChangeEvent) -> Self {
        Self {
            at: Utc::now(),
            message: event.to_string(),
            event,
        }
    }
}
