//! Team, Group, raw counters and derived ratios.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a team (provider ids can be numeric or textual).
pub type TeamId = String;

/// Value used for a ratio whose denominator is zero.
pub const RATIO_SENTINEL: f64 = 999.0;

/// One of the four parallel pools teams are organized into.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
    C,
    D,
}

impl Group {
    pub const ALL: [Group; 4] = [Group::A, Group::B, Group::C, Group::D];

    pub fn letter(self) -> &'static str {
        match self {
            Group::A => "A",
            Group::B => "B",
            Group::C => "C",
            Group::D => "D",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Group::A),
            "B" => Ok(Group::B),
            "C" => Ok(Group::C),
            "D" => Ok(Group::D),
            other => Err(other.to_string()),
        }
    }
}

/// A raw (user-editable) counter of a team's standing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Counter {
    GamesPlayed,
    GamesWon,
    GamesLost,
    ChampionshipPoints,
    SetsWon,
    SetsLost,
    PointsScored,
    PointsConceded,
}

impl Counter {
    pub const ALL: [Counter; 8] = [
        Counter::GamesPlayed,
        Counter::GamesWon,
        Counter::GamesLost,
        Counter::ChampionshipPoints,
        Counter::SetsWon,
        Counter::SetsLost,
        Counter::PointsScored,
        Counter::PointsConceded,
    ];

    /// snake_case name, as used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Counter::GamesPlayed => "games_played",
            Counter::GamesWon => "games_won",
            Counter::GamesLost => "games_lost",
            Counter::ChampionshipPoints => "championship_points",
            Counter::SetsWon => "sets_won",
            Counter::SetsLost => "sets_lost",
            Counter::PointsScored => "points_scored",
            Counter::PointsConceded => "points_conceded",
        }
    }

    /// The derived ratio that has to be recomputed when this counter changes.
    pub fn dependent_ratio(self) -> Ratio {
        match self {
            Counter::SetsWon | Counter::SetsLost => Ratio::Set,
            Counter::PointsScored | Counter::PointsConceded => Ratio::Point,
            Counter::GamesPlayed
            | Counter::GamesWon
            | Counter::GamesLost
            | Counter::ChampionshipPoints => Ratio::GamePoints,
        }
    }
}

impl FromStr for Counter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Counter::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Derived ratios of a team.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ratio {
    /// sets won / sets lost
    Set,
    /// points scored / points conceded
    Point,
    /// championship points / games played
    GamePoints,
}

/// Raw standing counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    pub games_played: u32,
    pub games_won: u32,
    pub games_lost: u32,
    pub championship_points: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub points_scored: u32,
    pub points_conceded: u32,
}

impl Counters {
    pub fn get(&self, counter: Counter) -> u32 {
        match counter {
            Counter::GamesPlayed => self.games_played,
            Counter::GamesWon => self.games_won,
            Counter::GamesLost => self.games_lost,
            Counter::ChampionshipPoints => self.championship_points,
            Counter::SetsWon => self.sets_won,
            Counter::SetsLost => self.sets_lost,
            Counter::PointsScored => self.points_scored,
            Counter::PointsConceded => self.points_conceded,
        }
    }

    pub(crate) fn set(&mut self, counter: Counter, value: u32) {
        let slot = match counter {
            Counter::GamesPlayed => &mut self.games_played,
            Counter::GamesWon => &mut self.games_won,
            Counter::GamesLost => &mut self.games_lost,
            Counter::ChampionshipPoints => &mut self.championship_points,
            Counter::SetsWon => &mut self.sets_won,
            Counter::SetsLost => &mut self.sets_lost,
            Counter::PointsScored => &mut self.points_scored,
            Counter::PointsConceded => &mut self.points_conceded,
        };
        *slot = value;
    }
}

/// Derived ratio values. Never edited directly; see `logic::ratios`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Ratios {
    pub set_ratio: f64,
    pub point_ratio: f64,
    pub game_points_ratio: f64,
}

impl Ratios {
    pub fn get(&self, ratio: Ratio) -> f64 {
        match ratio {
            Ratio::Set => self.set_ratio,
            Ratio::Point => self.point_ratio,
            Ratio::GamePoints => self.game_points_ratio,
        }
    }
}

/// A team in one group's standings.
///
/// Counters and ratios are only readable from outside the crate: every write goes through
/// the ratio engine so the ratios always match the counters they are derived from.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub group: Group,
    #[serde(flatten)]
    pub(crate) counters: Counters,
    #[serde(flatten)]
    pub(crate) ratios: Ratios,
    /// Position in the avulsa ranking; None until the ranking is computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification_rank: Option<usize>,
}

impl Team {
    /// Build a team from raw counters; ratios are derived immediately.
    pub fn new(
        id: impl Into<TeamId>,
        name: impl Into<String>,
        group: Group,
        counters: Counters,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            group,
            counters,
            ratios: crate::logic::derive_ratios(&counters),
            qualification_rank: None,
        }
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn counter(&self, counter: Counter) -> u32 {
        self.counters.get(counter)
    }

    pub fn ratios(&self) -> &Ratios {
        &self.ratios
    }

    pub fn set_ratio(&self) -> f64 {
        self.ratios.set_ratio
    }

    pub fn point_ratio(&self) -> f64 {
        self.ratios.point_ratio
    }

    pub fn game_points_ratio(&self) -> f64 {
        self.ratios.game_points_ratio
    }

    pub fn championship_points(&self) -> u32 {
        self.counters.championship_points
    }
}
