//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use volley_finals_sim::{Counters, Group, Team};

/// A team with the counters that matter for ranking; wins/losses follow from the points.
pub fn team(
    id: &str,
    group: Group,
    championship_points: u32,
    games_played: u32,
    sets: (u32, u32),
    points: (u32, u32),
) -> Team {
    Team::new(
        id,
        format!("Team {id}"),
        group,
        Counters {
            games_played,
            games_won: championship_points / 3,
            games_lost: games_played.saturating_sub(championship_points / 3),
            championship_points,
            sets_won: sets.0,
            sets_lost: sets.1,
            points_scored: points.0,
            points_conceded: points.1,
        },
    )
}

/// A team that differs from others only by championship points and games played.
pub fn simple_team(id: &str, group: Group, championship_points: u32, games_played: u32) -> Team {
    team(id, group, championship_points, games_played, (10, 10), (500, 500))
}

/// Two teams per group. Leaders `A1..D1`, runners-up `A2..D2`, all with 10 games played.
///
/// Game-points ratios: leaders D1 2.4 > C1 2.2 > B1 2.0 > A1 1.8; runners-up
/// D2 1.6 > C2 1.4 > B2 1.2 > A2 1.0. Avulsa order is therefore
/// D1 C1 B1 A1 D2 C2 B2 A2 and no quarterfinal pairs two teams of the same group.
pub fn four_groups_of_two() -> Vec<Team> {
    vec![
        simple_team("A1", Group::A, 18, 10),
        simple_team("A2", Group::A, 10, 10),
        simple_team("B1", Group::B, 20, 10),
        simple_team("B2", Group::B, 12, 10),
        simple_team("C1", Group::C, 22, 10),
        simple_team("C2", Group::C, 14, 10),
        simple_team("D1", Group::D, 24, 10),
        simple_team("D2", Group::D, 16, 10),
    ]
}

pub fn ids(teams: &[Team]) -> Vec<&str> {
    teams.iter().map(|t| t.id.as_str()).collect()
}
