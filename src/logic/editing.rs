//! Run-level operations: load, edit standings, compute ranking and bracket, pick winners.
//!
//! Each operation computes the new values first and only writes them into the run on
//! success, so an error leaves the run unchanged. The one exception is
//! `compute_avulsa_and_bracket`, which keeps a short avulsa ranking for display (and
//! clears the bracket) before returning `InvalidQualifiedCount`.
//!
//! Standings edits land in the per-group change log of the run.

use crate::logic::avulsa::{compute_cross_group_ranking, TOTAL_QUALIFIED};
use crate::logic::bracket::{generate_bracket, select_winner};
use crate::logic::match_outcome::apply_match_result;
use crate::logic::ratios::with_counter;
use crate::models::{
    ChangeEvent, Counter, Group, MatchResult, Run, RunError, RunStage, SlotId,
};
use crate::source::{format_load_errors, load_all_groups, StandingsSource};
use chrono::Utc;

/// Load every group from `source`, replacing current standings and the reset snapshot.
///
/// Partial loads succeed and keep the failures in `run.load_errors`; the run is left
/// unchanged only when no group produced any team.
pub fn load_standings(run: &mut Run, source: &dyn StandingsSource) -> Result<(), RunError> {
    let report = load_all_groups(source, &Group::ALL);
    if report.teams.is_empty() {
        return Err(RunError::DataUnavailable(format_load_errors(&report.errors, 0)));
    }
    log::info!(
        "Run {}: loaded {} teams ({} groups failed)",
        run.id,
        report.teams.len(),
        report.errors.len()
    );
    run.original_teams = report.teams.clone();
    run.teams = report.teams;
    run.load_errors = report.errors;
    run.loaded_at = Some(Utc::now());
    run.history.clear();
    run.avulsa.clear();
    run.bracket = None;
    run.stage = RunStage::EditData;
    Ok(())
}

/// Set one raw counter of a team; its dependent ratio is recomputed.
pub fn update_team_counter(
    run: &mut Run,
    team_id: &str,
    counter: Counter,
    value: u32,
) -> Result<(), RunError> {
    let idx = run
        .teams
        .iter()
        .position(|t| t.id == team_id)
        .ok_or_else(|| RunError::TeamNotFound(team_id.to_string()))?;
    let old = run.teams[idx].counter(counter);
    if old == value {
        return Ok(());
    }
    log::debug!("{}: {} {} -> {}", run.teams[idx].name, counter.key(), old, value);
    let updated = with_counter(&run.teams[idx], counter, value);
    let group = updated.group;
    run.record(
        group,
        ChangeEvent::CounterEdited {
            team_id: updated.id.clone(),
            team_name: updated.name.clone(),
            counter,
            old,
            new: value,
        },
    );
    run.teams[idx] = updated;
    run.invalidate_results();
    Ok(())
}

/// Simulate a match between two teams of the same group.
pub fn add_match_result(
    run: &mut Run,
    home_id: &str,
    away_id: &str,
    result: MatchResult,
) -> Result<(), RunError> {
    let teams = apply_match_result(&run.teams, home_id, away_id, result)?;
    log::debug!("Match added: {} vs {} -> {}", home_id, away_id, result);
    let home = teams.iter().find(|t| t.id == home_id);
    let away = teams.iter().find(|t| t.id == away_id);
    if let (Some(home), Some(away)) = (home, away) {
        let event = ChangeEvent::MatchAdded {
            home_id: home.id.clone(),
            home_name: home.name.clone(),
            away_id: away.id.clone(),
            away_name: away.name.clone(),
            result,
        };
        run.record(home.group, event);
    }
    run.teams = teams;
    run.invalidate_results();
    Ok(())
}

/// Put every team of `group` back to its loaded values. Teams not in the snapshot stay.
///
/// The group's change log is replaced by a single reset entry.
pub fn reset_group(run: &mut Run, group: Group) -> Result<(), RunError> {
    if run.original_teams.is_empty() {
        return Err(RunError::NoTeamsLoaded);
    }
    for team in run.teams.iter_mut().filter(|t| t.group == group) {
        if let Some(original) = run.original_teams.iter().find(|o| o.id == team.id) {
            *team = original.clone();
        }
    }
    log::info!("Run {}: group {} reset to loaded values", run.id, group);
    run.history.remove(&group);
    run.record(group, ChangeEvent::GroupReset);
    run.invalidate_results();
    Ok(())
}

/// Compute the avulsa ranking and, when it has exactly 8 teams, the bracket.
///
/// Slots are stamped with the run's playoff dates.
/// The ranking is kept even when its size is wrong so it can still be shown; the bracket
/// is cleared and `InvalidQualifiedCount` returned.
pub fn compute_avulsa_and_bracket(run: &mut Run) -> Result<(), RunError> {
    if run.teams.is_empty() {
        return Err(RunError::NoTeamsLoaded);
    }
    let avulsa = compute_cross_group_ranking(&run.teams);
    let count = avulsa.len();
    run.avulsa = avulsa;
    match generate_bracket(&run.avulsa) {
        Some(bracket) => {
            log::info!("Run {}: bracket generated", run.id);
            run.bracket = Some(bracket.with_dates(&run.playoff_dates));
            run.stage = RunStage::Results;
            Ok(())
        }
        None => {
            log::warn!(
                "Run {}: {} qualified teams, expected {}",
                run.id,
                count,
                TOTAL_QUALIFIED
            );
            run.bracket = None;
            run.stage = RunStage::EditData;
            Err(RunError::InvalidQualifiedCount { count })
        }
    }
}

/// Record the winner of a bracket slot and propagate it to later rounds.
pub fn select_bracket_winner(
    run: &mut Run,
    slot: SlotId,
    winner_id: &str,
) -> Result<(), RunError> {
    let bracket = run.bracket.as_ref().ok_or(RunError::NoBracket)?;
    let updated = select_winner(bracket, slot, winner_id)?;
    run.bracket = Some(updated);
    Ok(())
}
