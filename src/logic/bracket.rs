//! Playoff bracket: fixed seeding from the avulsa ranking and winner propagation.

use crate::logic::avulsa::TOTAL_QUALIFIED;
use crate::models::{Bracket, BracketMatch, RunError, Side, SlotId, SlotState, Team};

/// Which result of a slot moves on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Advance {
    Winner,
    Loser,
}

/// (source slot, who advances, target slot, target side). Quarterfinal feeds come before
/// semifinal feeds so one pass settles the whole bracket.
const FEEDS: [(SlotId, Advance, SlotId, Side); 8] = [
    (SlotId::Qf1, Advance::Winner, SlotId::Sf1, Side::Home),
    (SlotId::Qf4, Advance::Winner, SlotId::Sf1, Side::Away),
    (SlotId::Qf2, Advance::Winner, SlotId::Sf2, Side::Home),
    (SlotId::Qf3, Advance::Winner, SlotId::Sf2, Side::Away),
    (SlotId::Sf1, Advance::Winner, SlotId::F1, Side::Home),
    (SlotId::Sf2, Advance::Winner, SlotId::F1, Side::Away),
    (SlotId::Sf1, Advance::Loser, SlotId::F3p, Side::Home),
    (SlotId::Sf2, Advance::Loser, SlotId::F3p, Side::Away),
];

/// Quarterfinal pairings as (home seed, away seed), 1-based: 1v8, 2v7, 3v6, 4v5.
const QUARTERFINAL_SEEDS: [(SlotId, usize, usize); 4] = [
    (SlotId::Qf1, 1, 8),
    (SlotId::Qf2, 2, 7),
    (SlotId::Qf3, 3, 6),
    (SlotId::Qf4, 4, 5),
];

fn quarterfinal(id: SlotId, home: &Team, away: &Team) -> BracketMatch {
    BracketMatch {
        home: Some(home.clone()),
        away: Some(away.clone()),
        collision: home.group == away.group,
        ..BracketMatch::empty(id)
    }
}

/// Build the 8-slot bracket from exactly 8 ranked teams; None for any other count.
///
/// Same-group quarterfinals are flagged through `collision` but never re-paired.
pub fn generate_bracket(ranked: &[Team]) -> Option<Bracket> {
    if ranked.len() != TOTAL_QUALIFIED {
        return None;
    }
    let mut matches: Vec<BracketMatch> = QUARTERFINAL_SEEDS
        .iter()
        .map(|&(id, home, away)| quarterfinal(id, &ranked[home - 1], &ranked[away - 1]))
        .collect();
    matches.extend(
        [SlotId::Sf1, SlotId::Sf2, SlotId::F1, SlotId::F3p]
            .into_iter()
            .map(BracketMatch::empty),
    );

    let bracket = Bracket { matches };
    for m in bracket.matches.iter().filter(|m| m.collision) {
        log::warn!("{} pairs two teams of the same group", m.id);
    }
    Some(bracket)
}

/// Record `winner_id` as the winner of `slot` and propagate through the later rounds.
///
/// The slot must have both occupants and `winner_id` must be one of them.
pub fn select_winner(
    bracket: &Bracket,
    slot: SlotId,
    winner_id: &str,
) -> Result<Bracket, RunError> {
    let invalid = || RunError::InvalidWinnerSelection {
        slot,
        winner_id: winner_id.to_string(),
    };
    let target = bracket.slot(slot).ok_or_else(invalid)?;
    if target.state() == SlotState::Empty || !target.has_occupant(winner_id) {
        return Err(invalid());
    }

    let mut updated = bracket.clone();
    if let Some(m) = updated.slot_mut(slot) {
        m.winner_id = Some(winner_id.to_string());
    }
    propagate(&mut updated);
    Ok(updated)
}

/// Recompute every propagated occupant from the current winners.
///
/// A winner that no longer matches its slot's occupants (because an earlier round was
/// re-decided) is cleared, and everything downstream of it is emptied again. Slots that
/// are still waiting for an occupant never keep a winner.
pub fn propagate(bracket: &mut Bracket) {
    for (source, advance, target, side) in FEEDS {
        clear_stale_winner(bracket, source);
        let team = bracket.slot(source).and_then(|m| match advance {
            Advance::Winner => m.winner().cloned(),
            Advance::Loser => m.loser().cloned(),
        });
        if let Some(m) = bracket.slot_mut(target) {
            match side {
                Side::Home => m.home = team,
                Side::Away => m.away = team,
            }
        }
    }
    clear_stale_winner(bracket, SlotId::F1);
    clear_stale_winner(bracket, SlotId::F3p);
}

fn clear_stale_winner(bracket: &mut Bracket, id: SlotId) {
    if let Some(m) = bracket.slot_mut(id) {
        if m.winner_id.is_some() && m.state() != SlotState::Decided {
            log::debug!("Clearing stale winner of {}", id);
            m.winner_id = None;
        }
    }
}
