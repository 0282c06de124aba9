//! Simulator business logic: ratios, match outcomes, rankings, bracket, run editing.

mod avulsa;
mod bracket;
mod editing;
mod match_outcome;
mod ranking;
mod ratios;

pub use avulsa::{
    compute_cross_group_ranking, group_standings, qualified_teams, QUALIFIERS_PER_GROUP,
    TOTAL_QUALIFIED,
};
pub use bracket::{generate_bracket, propagate, select_winner};
pub use editing::{
    add_match_result, compute_avulsa_and_bracket, load_standings, reset_group,
    select_bracket_winner, update_team_counter,
};
pub use match_outcome::{apply_match_result, compute_delta, parse_result_code};
pub use ranking::{compare_teams, compare_teams_avulsa, RATIO_TOLERANCE};
pub use ratios::{
    derive_ratios, game_points_ratio, point_ratio, set_ratio, with_counter, with_counters,
};
