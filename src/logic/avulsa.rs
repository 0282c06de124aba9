//! Avulsa ranking: merges the top two of every group into one seeding list.
//!
//! Seeding is two-tiered. Group leaders take positions 1..=4 and runners-up 5..=8, each
//! tier ordered by [`compare_teams_avulsa`], so a runner-up never outranks a leader
//! regardless of its ratios.

use crate::logic::ranking::{compare_teams, compare_teams_avulsa};
use crate::models::{Group, Team};
use std::collections::BTreeMap;

/// Teams that qualify from each group.
pub const QUALIFIERS_PER_GROUP: usize = 2;
/// Size of the knockout stage.
pub const TOTAL_QUALIFIED: usize = 8;

/// Every group's table, sorted by [`compare_teams`]. All four groups are present, even empty.
pub fn group_standings(teams: &[Team]) -> BTreeMap<Group, Vec<Team>> {
    let mut grouped: BTreeMap<Group, Vec<Team>> =
        Group::ALL.into_iter().map(|g| (g, Vec::new())).collect();
    for team in teams {
        grouped.entry(team.group).or_default().push(team.clone());
    }
    for table in grouped.values_mut() {
        table.sort_by(compare_teams);
    }
    grouped
}

/// Top two of every group, in group order.
pub fn qualified_teams(teams: &[Team]) -> Vec<Team> {
    group_standings(teams)
        .into_values()
        .flat_map(|table| table.into_iter().take(QUALIFIERS_PER_GROUP))
        .collect()
}

/// Leaders first, then runners-up, with `qualification_rank` set to the 1-based position.
///
/// Groups with fewer than two teams contribute fewer entries; callers must check for
/// [`TOTAL_QUALIFIED`] entries before building a bracket.
pub fn compute_cross_group_ranking(teams: &[Team]) -> Vec<Team> {
    let mut leaders = Vec::new();
    let mut runners_up = Vec::new();
    for (_, table) in group_standings(teams) {
        let mut table = table.into_iter();
        if let Some(first) = table.next() {
            leaders.push(first);
        }
        if let Some(second) = table.next() {
            runners_up.push(second);
        }
    }

    leaders.sort_by(compare_teams_avulsa);
    runners_up.sort_by(compare_teams_avulsa);

    let mut ranked = leaders;
    ranked.append(&mut runners_up);
    for (idx, team) in ranked.iter_mut().enumerate() {
        team.qualification_rank = Some(idx + 1);
    }
    log::debug!("Avulsa ranking computed with {} teams", ranked.len());
    ranked
}
