//! Integration tests for run-level operations: load, edit, compute, pick winners.

mod common;

use common::{four_groups_of_two, ids};
use volley_finals_sim::{
    add_match_result, compute_avulsa_and_bracket, load_standings, reset_group,
    select_bracket_winner, update_team_counter, ChangeEvent, Counter, Group, MatchResult,
    MemorySource, PlayoffDates, RawTeamRecord, Run, RunError, RunStage, SlotId,
};

fn record(id: &str, points: u32, gp: u32) -> RawTeamRecord {
    RawTeamRecord {
        team_id: Some(id.to_string()),
        disp: Some(format!("Team {id}")),
        points,
        gp,
        sw: 10,
        sl: 10,
        pw: 500,
        pl: 500,
        ..RawTeamRecord::default()
    }
}

fn full_source() -> MemorySource {
    MemorySource::new()
        .with_group(Group::A, vec![record("A1", 18, 10), record("A2", 10, 10)])
        .with_group(Group::B, vec![record("B1", 20, 10), record("B2", 12, 10)])
        .with_group(Group::C, vec![record("C1", 22, 10), record("C2", 14, 10)])
        .with_group(Group::D, vec![record("D1", 24, 10), record("D2", 16, 10)])
}

fn computed_run() -> Run {
    let mut run = Run::with_teams(four_groups_of_two());
    compute_avulsa_and_bracket(&mut run).unwrap();
    run
}

#[test]
fn new_run_starts_in_load_stage() {
    let run = Run::new();
    assert_eq!(run.stage, RunStage::LoadData);
    assert!(run.teams.is_empty());
    assert!(run.bracket.is_none());
    assert!(run.loaded_at.is_none());
}

#[test]
fn loading_all_groups_fills_teams_and_snapshot() {
    let mut run = Run::new();
    load_standings(&mut run, &full_source()).unwrap();
    assert_eq!(run.stage, RunStage::EditData);
    assert_eq!(run.teams.len(), 8);
    assert_eq!(run.teams, run.original_teams);
    assert!(run.load_errors.is_empty());
    assert!(run.loaded_at.is_some());
    assert_eq!(run.group_count(), 4);

    let b1 = run.team("B1").unwrap();
    assert_eq!(b1.name, "Team B1");
    assert_eq!(b1.group, Group::B);
    assert_eq!(b1.game_points_ratio(), 2.0);
}

#[test]
fn partial_load_keeps_what_loaded_and_reports_the_rest() {
    let source = MemorySource::new()
        .with_group(Group::A, vec![record("A1", 18, 10), record("A2", 10, 10)])
        .with_group(Group::C, vec![record("C1", 22, 10)]);
    let mut run = Run::new();
    load_standings(&mut run, &source).unwrap();

    assert_eq!(run.teams.len(), 3);
    assert_eq!(run.group_count(), 2);
    let failed: Vec<Group> = run.load_errors.iter().map(|e| e.group).collect();
    assert_eq!(failed, vec![Group::B, Group::D]);

    assert_eq!(
        compute_avulsa_and_bracket(&mut run),
        Err(RunError::InvalidQualifiedCount { count: 3 })
    );
    assert_eq!(ids(&run.avulsa), vec!["C1", "A1", "A2"]);
    assert!(run.bracket.is_none());
    assert_eq!(run.stage, RunStage::EditData);
}

#[test]
fn failed_load_leaves_the_run_untouched() {
    let mut run = computed_run();
    let before_teams = run.teams.clone();
    let err = load_standings(&mut run, &MemorySource::new()).unwrap_err();
    match err {
        RunError::DataUnavailable(summary) => {
            assert!(summary.starts_with("Could not load data for any group."));
            assert!(summary.contains("• A: No teams found in the response"));
            assert!(summary.contains("• D: No teams found in the response"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(run.teams, before_teams);
    assert_eq!(run.stage, RunStage::Results);
    assert!(run.bracket.is_some());
}

#[test]
fn reloading_discards_ranking_and_bracket() {
    let mut run = computed_run();
    load_standings(&mut run, &full_source()).unwrap();
    assert!(run.avulsa.is_empty());
    assert!(run.bracket.is_none());
    assert_eq!(run.stage, RunStage::EditData);
}

#[test]
fn compute_builds_ranking_and_bracket() {
    let run = computed_run();
    assert_eq!(run.stage, RunStage::Results);
    assert_eq!(run.avulsa.len(), 8);
    assert_eq!(run.avulsa[0].qualification_rank, Some(1));
    let bracket = run.bracket.as_ref().unwrap();
    let qf1 = bracket.slot(SlotId::Qf1).unwrap();
    assert_eq!(qf1.home.as_ref().unwrap().id, "D1");
    assert_eq!(qf1.away.as_ref().unwrap().id, "A2");
}

#[test]
fn compute_without_teams_fails() {
    let mut run = Run::new();
    assert_eq!(compute_avulsa_and_bracket(&mut run), Err(RunError::NoTeamsLoaded));
}

#[test]
fn editing_a_counter_invalidates_results() {
    let mut run = computed_run();
    update_team_counter(&mut run, "A2", Counter::ChampionshipPoints, 30).unwrap();
    assert_eq!(run.team("A2").unwrap().championship_points(), 30);
    assert_eq!(run.team("A2").unwrap().game_points_ratio(), 3.0);
    assert!(run.avulsa.is_empty());
    assert!(run.bracket.is_none());
    assert_eq!(run.stage, RunStage::EditData);

    // A2 now leads group A and the whole ranking; A1 drops to best runner-up
    compute_avulsa_and_bracket(&mut run).unwrap();
    assert_eq!(run.avulsa[0].id, "A2");
    assert_eq!(run.avulsa[4].id, "A1");
}

#[test]
fn setting_a_counter_to_its_current_value_keeps_results() {
    let mut run = computed_run();
    update_team_counter(&mut run, "A2", Counter::ChampionshipPoints, 10).unwrap();
    assert_eq!(run.stage, RunStage::Results);
    assert!(run.bracket.is_some());
}

#[test]
fn editing_an_unknown_team_fails_without_changes() {
    let mut run = computed_run();
    assert_eq!(
        update_team_counter(&mut run, "Z9", Counter::SetsWon, 1),
        Err(RunError::TeamNotFound("Z9".to_string()))
    );
    assert!(run.bracket.is_some());
}

#[test]
fn simulated_match_updates_standings_and_invalidates_results() {
    let mut run = computed_run();
    add_match_result(&mut run, "A2", "A1", MatchResult::ThreeTwo).unwrap();
    let a2 = run.team("A2").unwrap();
    assert_eq!(a2.championship_points(), 12);
    assert_eq!(a2.counter(Counter::GamesPlayed), 11);
    assert_eq!(run.team("A1").unwrap().championship_points(), 19);
    assert!(run.bracket.is_none());
    assert_eq!(run.stage, RunStage::EditData);
}

#[test]
fn rejected_match_keeps_results() {
    let mut run = computed_run();
    assert!(add_match_result(&mut run, "A1", "B1", MatchResult::ThreeZero).is_err());
    assert_eq!(run.stage, RunStage::Results);
    assert_eq!(run.teams, four_groups_of_two());
}

#[test]
fn reset_restores_only_the_chosen_group() {
    let mut run = Run::with_teams(four_groups_of_two());
    add_match_result(&mut run, "A1", "A2", MatchResult::ThreeZero).unwrap();
    add_match_result(&mut run, "B1", "B2", MatchResult::ThreeZero).unwrap();

    reset_group(&mut run, Group::A).unwrap();
    assert_eq!(run.team("A1").unwrap().championship_points(), 18);
    assert_eq!(run.team("A2").unwrap().counter(Counter::GamesPlayed), 10);
    assert_eq!(run.team("B1").unwrap().championship_points(), 23);
}

#[test]
fn overflowing_match_changes_nothing() {
    let mut run = Run::with_teams(four_groups_of_two());
    update_team_counter(&mut run, "A1", Counter::SetsWon, u32::MAX).unwrap();
    let before = run.teams.clone();
    assert_eq!(
        add_match_result(&mut run, "A1", "A2", MatchResult::ThreeZero),
        Err(RunError::CounterOverflow {
            team_id: "A1".to_string(),
            counter: Counter::SetsWon,
        })
    );
    assert_eq!(run.teams, before);
    assert_eq!(run.history(Group::A).len(), 1);
}

#[test]
fn edits_are_logged_per_group_newest_first() {
    let mut run = Run::with_teams(four_groups_of_two());
    update_team_counter(&mut run, "A2", Counter::SetsWon, 12).unwrap();
    // unchanged value: nothing to log
    update_team_counter(&mut run, "A2", Counter::SetsWon, 12).unwrap();
    add_match_result(&mut run, "A1", "A2", MatchResult::ThreeTwo).unwrap();
    add_match_result(&mut run, "C2", "C1", MatchResult::ZeroThree).unwrap();

    let a = run.history(Group::A);
    assert_eq!(a.len(), 2);
    assert_eq!(a[0].message, "Match added: Team A1 vs Team A2 → 3-2");
    assert_eq!(a[1].message, "Team A2: sets_won 10 → 12");
    assert_eq!(
        a[1].event,
        ChangeEvent::CounterEdited {
            team_id: "A2".to_string(),
            team_name: "Team A2".to_string(),
            counter: Counter::SetsWon,
            old: 10,
            new: 12,
        }
    );
    assert!(a[0].at >= a[1].at);
    assert_eq!(run.history(Group::C).len(), 1);
    assert!(run.history(Group::B).is_empty());

    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["history"]["A"][1]["kind"], "counter_edited");
    assert_eq!(json["history"]["A"][1]["counter"], "sets_won");
    assert_eq!(json["history"]["C"][0]["kind"], "match_added");
}

#[test]
fn reset_replaces_the_group_log() {
    let mut run = Run::with_teams(four_groups_of_two());
    add_match_result(&mut run, "A1", "A2", MatchResult::ThreeZero).unwrap();
    add_match_result(&mut run, "B1", "B2", MatchResult::ThreeZero).unwrap();
    reset_group(&mut run, Group::A).unwrap();

    let a = run.history(Group::A);
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].event, ChangeEvent::GroupReset);
    assert_eq!(a[0].message, "Group reset to loaded values");
    assert_eq!(run.history(Group::B).len(), 1);
}

#[test]
fn loading_clears_the_change_log() {
    let mut run = Run::new();
    load_standings(&mut run, &full_source()).unwrap();
    update_team_counter(&mut run, "D1", Counter::GamesWon, 9).unwrap();
    assert_eq!(run.history(Group::D).len(), 1);
    load_standings(&mut run, &full_source()).unwrap();
    assert!(run.history.is_empty());
}

#[test]
fn bracket_slots_carry_the_round_dates() {
    let dates = PlayoffDates {
        quarterfinal: Some("Sat 7 March".to_string()),
        semifinal: Some("Sat 14 March".to_string()),
        final_match: Some("Sun 15 March".to_string()),
        third_place: None,
    };
    let mut run = Run::with_teams(four_groups_of_two()).with_playoff_dates(dates);
    compute_avulsa_and_bracket(&mut run).unwrap();
    let bracket = run.bracket.as_ref().unwrap();
    let date = |slot| bracket.slot(slot).unwrap().date.as_deref();
    assert_eq!(date(SlotId::Qf3), Some("Sat 7 March"));
    assert_eq!(date(SlotId::Sf2), Some("Sat 14 March"));
    assert_eq!(date(SlotId::F1), Some("Sun 15 March"));
    assert_eq!(date(SlotId::F3p), None);

    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["bracket"][0]["date"], "Sat 7 March");
    assert!(json["bracket"][7].get("date").is_none());
}

#[test]
fn reset_before_load_fails() {
    let mut run = Run::new();
    assert_eq!(reset_group(&mut run, Group::C), Err(RunError::NoTeamsLoaded));
}

#[test]
fn winners_are_picked_on_the_run_bracket() {
    let mut run = computed_run();
    select_bracket_winner(&mut run, SlotId::Qf1, "D1").unwrap();
    select_bracket_winner(&mut run, SlotId::Qf4, "A1").unwrap();
    let sf1 = run.bracket.as_ref().unwrap().slot(SlotId::Sf1).unwrap();
    assert_eq!(sf1.home.as_ref().unwrap().id, "D1");
    assert_eq!(sf1.away.as_ref().unwrap().id, "A1");

    let before = run.bracket.clone();
    assert!(select_bracket_winner(&mut run, SlotId::F1, "D1").is_err());
    assert_eq!(run.bracket, before);
}

#[test]
fn picking_a_winner_needs_a_bracket() {
    let mut run = Run::with_teams(four_groups_of_two());
    assert_eq!(
        select_bracket_winner(&mut run, SlotId::Qf1, "D1"),
        Err(RunError::NoBracket)
    );
}

#[test]
fn run_serializes_with_flat_team_counters() {
    let run = computed_run();
    let json = serde_json::to_value(&run).unwrap();
    assert_eq!(json["stage"], "results");
    let first = &json["avulsa"][0];
    assert_eq!(first["id"], "D1");
    assert_eq!(first["championship_points"], 24);
    assert_eq!(first["game_points_ratio"], 2.4);
    assert_eq!(first["qualification_rank"], 1);
    assert_eq!(json["bracket"][0]["id"], "QF1");
    assert_eq!(json["bracket"][6]["label"], "Final 1st-2nd place");
}
