//! Integration tests for group standings and the avulsa ranking.

mod common;

use common::{four_groups_of_two, ids, simple_team};
use volley_finals_sim::logic::TOTAL_QUALIFIED;
use volley_finals_sim::{compute_cross_group_ranking, group_standings, qualified_teams, Group};

#[test]
fn leaders_come_before_runners_up() {
    let ranked = compute_cross_group_ranking(&four_groups_of_two());
    assert_eq!(ranked.len(), TOTAL_QUALIFIED);
    assert_eq!(
        ids(&ranked),
        vec!["D1", "C1", "B1", "A1", "D2", "C2", "B2", "A2"]
    );
    let ranks: Vec<Option<usize>> = ranked.iter().map(|t| t.qualification_rank).collect();
    assert_eq!(ranks, (1..=8).map(Some).collect::<Vec<_>>());
}

#[test]
fn a_strong_runner_up_never_outranks_a_weak_leader() {
    let mut teams = four_groups_of_two();
    // group D: runner-up with a better ratio than every leader but fewer points in its group
    teams.retain(|t| t.id != "D1" && t.id != "D2");
    teams.push(simple_team("D1", Group::D, 30, 14));
    teams.push(simple_team("D2", Group::D, 28, 10));

    let ranked = compute_cross_group_ranking(&teams);
    let position = |id: &str| ranked.iter().position(|t| t.id == id).unwrap();
    assert!(position("D2") >= 4);
    assert_eq!(ranked[4].id, "D2");
    assert!(ranked[..4].iter().all(|t| !t.id.ends_with('2')));
}

#[test]
fn third_placed_teams_do_not_qualify() {
    let mut teams = four_groups_of_two();
    teams.push(simple_team("A3", Group::A, 2, 10));
    teams.push(simple_team("C3", Group::C, 0, 10));

    let ranked = compute_cross_group_ranking(&teams);
    assert_eq!(ranked.len(), 8);
    assert!(!ranked.iter().any(|t| t.id == "A3" || t.id == "C3"));

    let qualified = qualified_teams(&teams);
    assert_eq!(
        ids(&qualified),
        vec!["A1", "A2", "B1", "B2", "C1", "C2", "D1", "D2"]
    );
}

#[test]
fn a_group_with_one_team_yields_seven_qualifiers() {
    let teams: Vec<_> = four_groups_of_two()
        .into_iter()
        .filter(|t| t.id != "B2")
        .collect();
    let ranked = compute_cross_group_ranking(&teams);
    assert_eq!(ranked.len(), 7);
    assert_eq!(ids(&ranked), vec!["D1", "C1", "B1", "A1", "D2", "C2", "A2"]);
}

#[test]
fn empty_input_gives_empty_ranking() {
    assert!(compute_cross_group_ranking(&[]).is_empty());
}

#[test]
fn standings_list_every_group_sorted() {
    let mut teams = vec![
        simple_team("a-low", Group::A, 3, 4),
        simple_team("a-high", Group::A, 9, 4),
    ];
    teams.push(simple_team("c-only", Group::C, 0, 0));

    let standings = group_standings(&teams);
    assert_eq!(standings.len(), 4);
    assert_eq!(ids(&standings[&Group::A]), vec!["a-high", "a-low"]);
    assert!(standings[&Group::B].is_empty());
    assert_eq!(ids(&standings[&Group::C]), vec!["c-only"]);
    assert!(standings[&Group::D].is_empty());
}

#[test]
fn ranking_does_not_depend_on_input_order() {
    let teams = four_groups_of_two();
    let mut reversed = teams.clone();
    reversed.reverse();
    assert_eq!(
        ids(&compute_cross_group_ranking(&teams)),
        ids(&compute_cross_group_ranking(&reversed))
    );
}
