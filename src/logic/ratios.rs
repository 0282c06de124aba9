//! Ratio engine: keeps a team's derived ratios in step with its raw counters.
//!
//! Zero denominators never produce NaN or infinity. Set and point ratios fall back to
//! [`RATIO_SENTINEL`] (treated as "undefined, but high"), the game-points ratio to 0.

use crate::models::{Counter, Counters, Ratio, Ratios, Team, RATIO_SENTINEL};

fn ratio_or_sentinel(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        RATIO_SENTINEL
    } else {
        f64::from(numerator) / f64::from(denominator)
    }
}

pub fn set_ratio(counters: &Counters) -> f64 {
    ratio_or_sentinel(counters.sets_won, counters.sets_lost)
}

pub fn point_ratio(counters: &Counters) -> f64 {
    ratio_or_sentinel(counters.points_scored, counters.points_conceded)
}

/// Championship points per game played; 0 before the first game.
pub fn game_points_ratio(counters: &Counters) -> f64 {
    if counters.games_played == 0 {
        0.0
    } else {
        f64::from(counters.championship_points) / f64::from(counters.games_played)
    }
}

fn compute(ratio: Ratio, counters: &Counters) -> f64 {
    match ratio {
        Ratio::Set => set_ratio(counters),
        Ratio::Point => point_ratio(counters),
        Ratio::GamePoints => game_points_ratio(counters),
    }
}

/// All three ratios from scratch.
pub fn derive_ratios(counters: &Counters) -> Ratios {
    Ratios {
        set_ratio: set_ratio(counters),
        point_ratio: point_ratio(counters),
        game_points_ratio: game_points_ratio(counters),
    }
}

/// Return a copy of `team` with `counter` set to `value` and the one ratio depending on it
/// recomputed. Everything else is left as it was.
pub fn with_counter(team: &Team, counter: Counter, value: u32) -> Team {
    let mut updated = team.clone();
    updated.counters.set(counter, value);
    let ratio = counter.dependent_ratio();
    let recomputed = compute(ratio, &updated.counters);
    match ratio {
        Ratio::Set => updated.ratios.set_ratio = recomputed,
        Ratio::Point => updated.ratios.point_ratio = recomputed,
        Ratio::GamePoints => updated.ratios.game_points_ratio = recomputed,
    }
    updated
}

/// Return a copy of `team` with new counters and every ratio recomputed.
pub fn with_counters(team: &Team, counters: Counters) -> Team {
    Team {
        counters,
        ratios: derive_ratios(&counters),
        ..team.clone()
    }
}
