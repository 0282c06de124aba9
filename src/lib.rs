//! Volleyball finals simulator: library with models, ranking/bracket logic and data sources.

pub mod config;
pub mod logic;
pub mod models;
pub mod source;

pub use config::{Config, ConfigError};
pub use logic::{
    add_match_result, apply_match_result, compare_teams, compare_teams_avulsa,
    compute_avulsa_and_bracket, compute_cross_group_ranking, compute_delta, generate_bracket,
    group_standings, load_standings, qualified_teams, reset_group, select_bracket_winner,
    select_winner, update_team_counter, with_counter,
};
pub use models::{
    Bracket, BracketMatch, ChangeEntry, ChangeEvent, Counter, CounterDelta, Counters, Group,
    MatchResult, PlayoffDates, Round, Run, RunError, RunId, RunStage, Side, SlotId, SlotState,
    Team, TeamId, RATIO_SENTINEL,
};
pub use source::{
    CsvDirSource, FallbackSource, GroupLoadError, JsonDirSource, MemorySource, RawTeamRecord,
    SourceError, StandingsSource,
};
