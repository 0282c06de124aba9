//! Match outcome calculator: turns a simulated result into counter changes for both teams.

use crate::logic::ratios::with_counters;
use crate::models::{Counter, CounterDelta, Counters, MatchResult, RunError, Side, Team};

/// Points awarded to the winner / loser of a regular set.
const SET_POINTS: (u32, u32) = (25, 15);
/// Points awarded to the winner / loser of the deciding fifth set.
const TIE_BREAK_POINTS: (u32, u32) = (15, 10);

/// Parse a "3-1" style code.
pub fn parse_result_code(code: &str) -> Result<MatchResult, RunError> {
    code.parse::<MatchResult>()
        .map_err(RunError::InvalidResultCode)
}

/// Counter deltas for the team playing on `side`.
///
/// Every set is scored 25-15 for its winner, except the fifth set of a 3-2 match, which the
/// match winner takes 15-10.
pub fn compute_delta(result: MatchResult, side: Side) -> CounterDelta {
    let (home_sets, away_sets) = result.sets();
    let (sets_won, sets_lost) = match side {
        Side::Home => (home_sets, away_sets),
        Side::Away => (away_sets, home_sets),
    };
    let is_winner = result.winner() == side;
    let tie_break = result.went_to_tie_break();

    // Regular sets this side won / lost.
    let (regular_won, regular_lost) = match (tie_break, is_winner) {
        (true, true) => (sets_won - 1, sets_lost),
        (true, false) => (sets_won, sets_lost - 1),
        (false, _) => (sets_won, sets_lost),
    };
    let mut points_scored = SET_POINTS.0 * regular_won + SET_POINTS.1 * regular_lost;
    let mut points_conceded = SET_POINTS.1 * regular_won + SET_POINTS.0 * regular_lost;
    if tie_break {
        let (own, other) = if is_winner {
            TIE_BREAK_POINTS
        } else {
            (TIE_BREAK_POINTS.1, TIE_BREAK_POINTS.0)
        };
        points_scored += own;
        points_conceded += other;
    }

    let championship_points = match (is_winner, tie_break) {
        (true, false) => 3,
        (true, true) => 2,
        (false, true) => 1,
        (false, false) => 0,
    };

    CounterDelta {
        championship_points,
        sets_won,
        sets_lost,
        points_scored,
        points_conceded,
        games_won: u32::from(is_winner),
        games_lost: u32::from(!is_winner),
    }
}

fn apply_delta(team: &Team, delta: &CounterDelta) -> Result<Team, RunError> {
    let c = team.counters();
    let add = |counter: Counter, value: u32, increment: u32| {
        value
            .checked_add(increment)
            .ok_or_else(|| RunError::CounterOverflow {
                team_id: team.id.clone(),
                counter,
            })
    };
    let counters = Counters {
        games_played: add(Counter::GamesPlayed, c.games_played, 1)?,
        games_won: add(Counter::GamesWon, c.games_won, delta.games_won)?,
        games_lost: add(Counter::GamesLost, c.games_lost, delta.games_lost)?,
        championship_points: add(
            Counter::ChampionshipPoints,
            c.championship_points,
            delta.championship_points,
        )?,
        sets_won: add(Counter::SetsWon, c.sets_won, delta.sets_won)?,
        sets_lost: add(Counter::SetsLost, c.sets_lost, delta.sets_lost)?,
        points_scored: add(Counter::PointsScored, c.points_scored, delta.points_scored)?,
        points_conceded: add(Counter::PointsConceded, c.points_conceded, delta.points_conceded)?,
    };
    Ok(with_counters(team, counters))
}

/// Apply a simulated match between two teams of the same group.
///
/// Returns the new team list; both teams get one more game played, their deltas and
/// freshly derived ratios. The input is left untouched, also when a counter would
/// overflow.
pub fn apply_match_result(
    teams: &[Team],
    home_id: &str,
    away_id: &str,
    result: MatchResult,
) -> Result<Vec<Team>, RunError> {
    if home_id == away_id {
        return Err(RunError::SameTeam(home_id.to_string()));
    }
    let home = teams
        .iter()
        .find(|t| t.id == home_id)
        .ok_or_else(|| RunError::TeamNotFound(home_id.to_string()))?;
    let away = teams
        .iter()
        .find(|t| t.id == away_id)
        .ok_or_else(|| RunError::TeamNotFound(away_id.to_string()))?;
    if home.group != away.group {
        return Err(RunError::DifferentGroups {
            home: home.group,
            away: away.group,
        });
    }

    let home_delta = compute_delta(result, Side::Home);
    let away_delta = compute_delta(result, Side::Away);
    let home = apply_delta(home, &home_delta)?;
    let away = apply_delta(away, &away_delta)?;
    Ok(teams
        .iter()
        .map(|t| {
            if t.id == home_id {
                home.clone()
            } else if t.id == away_id {
                away.clone()
            } else {
                t.clone()
            }
        })
        .collect())
}
