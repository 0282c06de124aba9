//! Run: the context a simulation is carried out in, and its errors.

use crate::models::bracket::{Bracket, PlayoffDates, SlotId};
use crate::models::history::{ChangeEntry, ChangeEvent};
use crate::models::team::{Counter, Group, Team, TeamId};
use crate::source::GroupLoadError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Errors that can occur during run operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RunError {
    /// No group produced any team; carries the aggregated load summary.
    DataUnavailable(String),
    /// An operation needs teams but nothing has been loaded.
    NoTeamsLoaded,
    /// The avulsa ranking did not produce exactly 8 teams.
    InvalidQualifiedCount { count: usize },
    /// A match result code outside 3-0, 3-1, 3-2, 0-3, 1-3, 2-3.
    InvalidResultCode(String),
    /// Slot not playable yet, or the winner is not one of its occupants.
    InvalidWinnerSelection { slot: SlotId, winner_id: TeamId },
    /// Not a known bracket slot code.
    UnknownSlot(String),
    /// Not a known raw counter name.
    UnknownCounter(String),
    /// Not one of the four groups.
    UnknownGroup(String),
    TeamNotFound(TeamId),
    /// A match needs two different teams.
    SameTeam(TeamId),
    /// Simulated matches are only played inside one group.
    DifferentGroups { home: Group, away: Group },
    /// Bracket operations before the bracket has been generated.
    NoBracket,
    /// Applying a match would push a counter past its maximum.
    CounterOverflow { team_id: TeamId, counter: Counter },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::DataUnavailable(summary) => write!(f, "{}", summary),
            RunError::NoTeamsLoaded => write!(f, "No teams loaded"),
            RunError::InvalidQualifiedCount { count } => {
                write!(f, "Invalid qualified-team count: expected 8, got {}", count)
            }
            RunError::InvalidResultCode(code) => write!(f, "Invalid match result code '{}'", code),
            RunError::InvalidWinnerSelection { slot, winner_id } => {
                write!(f, "Team {} cannot be selected as winner of {}", winner_id, slot)
            }
            RunError::UnknownSlot(code) => write!(f, "Unknown bracket slot '{}'", code),
            RunError::UnknownCounter(name) => write!(f, "Unknown counter '{}'", name),
            RunError::UnknownGroup(name) => write!(f, "Unknown group '{}'", name),
            RunError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            RunError::SameTeam(id) => write!(f, "Team {} cannot play against itself", id),
            RunError::DifferentGroups { home, away } => write!(
                f,
                "Teams belong to different groups ({} and {})",
                home, away
            ),
            RunError::NoBracket => write!(f, "Bracket has not been generated"),
            RunError::CounterOverflow { team_id, counter } => {
                write!(f, "Counter {} of team {} would overflow", counter.key(), team_id)
            }
        }
    }
}

impl std::error::Error for RunError {}

/// Unique identifier for a run.
pub type RunId = Uuid;

/// Where the operator is in the load → edit → results flow.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    /// Nothing loaded yet.
    #[default]
    LoadData,
    /// Standings loaded; counters may be edited and matches simulated.
    EditData,
    /// Avulsa ranking and bracket computed.
    Results,
}

/// Full state of one simulation: standings, snapshot, ranking and bracket.
#[derive(Clone, Debug, Serialize)]
pub struct Run {
    pub id: RunId,
    pub created_at: DateTime<Utc>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub stage: RunStage,
    /// Current (possibly edited) standings of every group.
    pub teams: Vec<Team>,
    /// Standings as loaded; source for per-group resets.
    pub original_teams: Vec<Team>,
    /// Avulsa ranking; empty until computed.
    pub avulsa: Vec<Team>,
    pub bracket: Option<Bracket>,
    /// Groups that failed to load in the last load.
    pub load_errors: Vec<GroupLoadError>,
    /// Operator edits per group, newest first.
    pub history: BTreeMap<Group, Vec<ChangeEntry>>,
    /// Dates stamped on the bracket when it is generated.
    pub playoff_dates: PlayoffDates,
}

impl Run {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            loaded_at: None,
            stage: RunStage::LoadData,
            teams: Vec::new(),
            original_teams: Vec::new(),
            avulsa: Vec::new(),
            bracket: None,
            load_errors: Vec::new(),
            history: BTreeMap::new(),
            playoff_dates: PlayoffDates::default(),
        }
    }

    pub fn with_playoff_dates(mut self, dates: PlayoffDates) -> Self {
        self.playoff_dates = dates;
        self
    }

    /// A run whose standings are already known (skips the load stage).
    pub fn with_teams(teams: Vec<Team>) -> Self {
        Self {
            stage: RunStage::EditData,
            loaded_at: Some(Utc::now()),
            original_teams: teams.clone(),
            teams,
            ..Self::new()
        }
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Number of groups with at least one team.
    pub fn group_count(&self) -> usize {
        Group::ALL
            .into_iter()
            .filter(|g| self.teams.iter().any(|t| t.group == *g))
            .count()
    }

    /// Change log of one group, newest first.
    pub fn history(&self, group: Group) -> &[ChangeEntry] {
        self.history.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn record(&mut self, group: Group, event: ChangeEvent) {
        self.history
            .entry(group)
            .or_default()
            .insert(0, ChangeEntry::new(event));
    }

    /// Drop the derived ranking and bracket after the standings changed.
    pub(crate) fn invalidate_results(&mut self) {
        self.avulsa.clear();
        self.bracket = None;
        if self.stage == RunStage::Results {
            self.stage = RunStage::EditData;
        }
    }
}

impl Default for Run {
    fn default() -> Self {
        Self::new()
    }
}
