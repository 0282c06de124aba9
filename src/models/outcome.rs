//! Match result codes and the counter deltas they produce.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Final set score of a simulated match, from the home team's point of view.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "3-0")]
    ThreeZero,
    #[serde(rename = "3-1")]
    ThreeOne,
    #[serde(rename = "3-2")]
    ThreeTwo,
    #[serde(rename = "0-3")]
    ZeroThree,
    #[serde(rename = "1-3")]
    OneThree,
    #[serde(rename = "2-3")]
    TwoThree,
}

impl MatchResult {
    pub const ALL: [MatchResult; 6] = [
        MatchResult::ThreeZero,
        MatchResult::ThreeOne,
        MatchResult::ThreeTwo,
        MatchResult::ZeroThree,
        MatchResult::OneThree,
        MatchResult::TwoThree,
    ];

    pub fn code(self) -> &'static str {
        match self {
            MatchResult::ThreeZero => "3-0",
            MatchResult::ThreeOne => "3-1",
            MatchResult::ThreeTwo => "3-2",
            MatchResult::ZeroThree => "0-3",
            MatchResult::OneThree => "1-3",
            MatchResult::TwoThree => "2-3",
        }
    }

    /// (home sets, away sets)
    pub fn sets(self) -> (u32, u32) {
        match self {
            MatchResult::ThreeZero => (3, 0),
            MatchResult::ThreeOne => (3, 1),
            MatchResult::ThreeTwo => (3, 2),
            MatchResult::ZeroThree => (0, 3),
            MatchResult::OneThree => (1, 3),
            MatchResult::TwoThree => (2, 3),
        }
    }

    pub fn winner(self) -> Side {
        let (home, away) = self.sets();
        if home > away {
            Side::Home
        } else {
            Side::Away
        }
    }

    /// True when the match went to the fifth (tie-break) set.
    pub fn went_to_tie_break(self) -> bool {
        let (home, away) = self.sets();
        home + away == 5
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for MatchResult {
    type Err = String;

    /// Parses "3-1" style codes; anything outside the six legal scores is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        MatchResult::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| code.to_string())
    }
}

/// Which side of a match a team played on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

/// Counter increments for one team after one match.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct CounterDelta {
    pub championship_points: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
    pub points_scored: u32,
    pub points_conceded: u32,
    pub games_won: u32,
    pub games_lost: u32,
}
