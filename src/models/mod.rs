//! Data structures for the finals simulator: teams, match results, bracket, run state
//! and its change log.

mod bracket;
mod history;
mod outcome;
mod run;
mod team;

pub use bracket::{Bracket, BracketMatch, PlayoffDates, Round, SlotId, SlotState};
pub use history::{ChangeEntry, ChangeEvent};
pub use outcome::{CounterDelta, MatchResult, Side};
pub use run::{Run, RunError, RunId, RunStage};
pub use team::{Counter, Counters, Group, Ratio, Ratios, Team, TeamId, RATIO_SENTINEL};
