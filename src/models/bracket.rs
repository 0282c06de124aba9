//! Playoff bracket: slots, rounds and the 8-slot structure.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable id of one bracket slot.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum SlotId {
    #[serde(rename = "QF1")]
    Qf1,
    #[serde(rename = "QF2")]
    Qf2,
    #[serde(rename = "QF3")]
    Qf3,
    #[serde(rename = "QF4")]
    Qf4,
    #[serde(rename = "SF1")]
    Sf1,
    #[serde(rename = "SF2")]
    Sf2,
    #[serde(rename = "F1")]
    F1,
    #[serde(rename = "F3P")]
    F3p,
}

impl SlotId {
    /// All slots in bracket order: quarterfinals, semifinals, final, third place.
    pub const ALL: [SlotId; 8] = [
        SlotId::Qf1,
        SlotId::Qf2,
        SlotId::Qf3,
        SlotId::Qf4,
        SlotId::Sf1,
        SlotId::Sf2,
        SlotId::F1,
        SlotId::F3p,
    ];

    pub fn code(self) -> &'static str {
        match self {
            SlotId::Qf1 => "QF1",
            SlotId::Qf2 => "QF2",
            SlotId::Qf3 => "QF3",
            SlotId::Qf4 => "QF4",
            SlotId::Sf1 => "SF1",
            SlotId::Sf2 => "SF2",
            SlotId::F1 => "F1",
            SlotId::F3p => "F3P",
        }
    }

    pub fn round(self) -> Round {
        match self {
            SlotId::Qf1 | SlotId::Qf2 | SlotId::Qf3 | SlotId::Qf4 => Round::Quarterfinal,
            SlotId::Sf1 | SlotId::Sf2 => Round::Semifinal,
            SlotId::F1 => Round::Final,
            SlotId::F3p => Round::ThirdPlace,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotId::Qf1 => "Quarterfinal 1",
            SlotId::Qf2 => "Quarterfinal 2",
            SlotId::Qf3 => "Quarterfinal 3",
            SlotId::Qf4 => "Quarterfinal 4",
            SlotId::Sf1 => "Semifinal 1",
            SlotId::Sf2 => "Semifinal 2",
            SlotId::F1 => "Final 1st-2nd place",
            SlotId::F3p => "Final 3rd-4th place",
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SlotId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        SlotId::ALL
            .into_iter()
            .find(|id| id.code() == code)
            .ok_or(code)
    }
}

/// Knockout round a slot belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    Quarterfinal,
    Semifinal,
    Final,
    ThirdPlace,
}

/// Scheduled date of each round, free text as published ("Sat 7 or Sun 8 March").
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffDates {
    pub quarterfinal: Option<String>,
    pub semifinal: Option<String>,
    pub final_match: Option<String>,
    pub third_place: Option<String>,
}

impl PlayoffDates {
    pub fn for_round(&self, round: Round) -> Option<&str> {
        match round {
            Round::Quarterfinal => self.quarterfinal.as_deref(),
            Round::Semifinal => self.semifinal.as_deref(),
            Round::Final => self.final_match.as_deref(),
            Round::ThirdPlace => self.third_place.as_deref(),
        }
    }
}

/// Progress of a single slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// At least one occupant still depends on an earlier round.
    Empty,
    /// Both occupants known, no winner yet.
    Populated,
    /// Winner recorded.
    Decided,
}

/// A single elimination-bracket slot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BracketMatch {
    pub id: SlotId,
    pub round: Round,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub home: Option<Team>,
    pub away: Option<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_id: Option<TeamId>,
    /// Both occupants come from the same group.
    pub collision: bool,
}

impl BracketMatch {
    /// A slot whose occupants will be filled by propagation.
    pub fn empty(id: SlotId) -> Self {
        Self {
            id,
            round: id.round(),
            label: id.label().to_string(),
            date: None,
            home: None,
            away: None,
            winner_id: None,
            collision: false,
        }
    }

    pub fn state(&self) -> SlotState {
        match (&self.home, &self.away) {
            (Some(_), Some(_)) if self.winner().is_some() => SlotState::Decided,
            (Some(_), Some(_)) => SlotState::Populated,
            _ => SlotState::Empty,
        }
    }

    /// The occupant whose id matches `winner_id`, if any.
    pub fn winner(&self) -> Option<&Team> {
        let winner_id = self.winner_id.as_ref()?;
        [&self.home, &self.away]
            .into_iter()
            .flatten()
            .find(|t| &t.id == winner_id)
    }

    /// The occupant that is not the winner; None until the slot is decided.
    pub fn loser(&self) -> Option<&Team> {
        let winner = self.winner()?;
        [&self.home, &self.away]
            .into_iter()
            .flatten()
            .find(|t| t.id != winner.id)
    }

    pub fn has_occupant(&self, team_id: &str) -> bool {
        [&self.home, &self.away]
            .into_iter()
            .flatten()
            .any(|t| t.id == team_id)
    }
}

/// The full 8-slot playoff structure.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Bracket {
    pub matches: Vec<BracketMatch>,
}

impl Bracket {
    pub fn slot(&self, id: SlotId) -> Option<&BracketMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut BracketMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn round(&self, round: Round) -> impl Iterator<Item = &BracketMatch> {
        self.matches.iter().filter(move |m| m.round == round)
    }

    /// Stamp every slot with the date of its round.
    pub fn with_dates(mut self, dates: &PlayoffDates) -> Self {
        for m in &mut self.matches {
            m.date = dates.for_round(m.round).map(str::to_string);
        }
        self
    }

    /// Any quarterfinal pairs two teams of the same group.
    pub fn has_quarterfinal_collisions(&self) -> bool {
        self.round(Round::Quarterfinal).any(|m| m.collision)
    }
}
