//! Boundary adapter: raw per-team records as standings providers publish them.
//!
//! Field mapping (provider name → domain counter), closed:
//!
//! | provider  | domain              |
//! |-----------|---------------------|
//! | `team_id` | id                  |
//! | `disp`    | name                |
//! | `sw`      | sets won            |
//! | `sl`      | sets lost           |
//! | `pw`      | points scored       |
//! | `pl`      | points conceded     |
//! | `points`  | championship points |
//! | `gp`      | games played        |
//! | `w`       | games won           |
//! | `l`       | games lost          |
//!
//! The domain names are accepted as aliases so hand-written files can use either. Missing
//! counters default to 0.

use crate::models::{Counters, Group, Team};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Name used when a record carries no display name.
pub const UNKNOWN_TEAM_NAME: &str = "TEAM";

/// One row of a provider's standings table.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTeamRecord {
    #[serde(alias = "id", deserialize_with = "de_text")]
    pub team_id: Option<String>,
    #[serde(alias = "name", deserialize_with = "de_text")]
    pub disp: Option<String>,
    #[serde(alias = "sets_won", deserialize_with = "de_counter")]
    pub sw: u32,
    #[serde(alias = "sets_lost", deserialize_with = "de_counter")]
    pub sl: u32,
    #[serde(alias = "points_scored", deserialize_with = "de_counter")]
    pub pw: u32,
    #[serde(alias = "points_conceded", deserialize_with = "de_counter")]
    pub pl: u32,
    #[serde(alias = "championship_points", deserialize_with = "de_counter")]
    pub points: u32,
    #[serde(alias = "games_played", deserialize_with = "de_counter")]
    pub gp: u32,
    #[serde(alias = "games_won", deserialize_with = "de_counter")]
    pub w: u32,
    #[serde(alias = "games_lost", deserialize_with = "de_counter")]
    pub l: u32,
}

impl RawTeamRecord {
    pub fn counters(&self) -> Counters {
        Counters {
            games_played: self.gp,
            games_won: self.w,
            games_lost: self.l,
            championship_points: self.points,
            sets_won: self.sw,
            sets_lost: self.sl,
            points_scored: self.pw,
            points_conceded: self.pl,
        }
    }

    /// Normalize into a team of `group`, deriving its ratios.
    ///
    /// Records without an id get a unique `<group>-unknown-<uuid>` id.
    pub fn into_team(self, group: Group) -> Team {
        let counters = self.counters();
        let id = self
            .team_id
            .unwrap_or_else(|| format!("{}-unknown-{}", group, Uuid::new_v4()));
        let name = self.disp.unwrap_or_else(|| UNKNOWN_TEAM_NAME.to_string());
        Team::new(id, name, group, counters)
    }
}

/// Scalar shapes providers use for numbers and ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

fn de_counter<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Scalar>::deserialize(deserializer)? {
        None => 0,
        Some(Scalar::Int(n)) => n.clamp(0, i64::from(u32::MAX)) as u32,
        Some(Scalar::Float(x)) if x.is_finite() && x > 0.0 => x.min(f64::from(u32::MAX)) as u32,
        Some(Scalar::Float(_)) => 0,
        Some(Scalar::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0
            } else {
                s.parse::<f64>()
                    .map_err(|_| {
                        <D::Error as serde::de::Error>::custom(format!("not a number: '{}'", s))
                    })?
                    .max(0.0)
                    .min(f64::from(u32::MAX)) as u32
            }
        }
    };
    Ok(value)
}

/// Ids and names: numbers are kept as their text form, blank text counts as missing.
fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => None,
        Some(Scalar::Int(n)) => Some(n.to_string()),
        Some(Scalar::Float(x)) => Some(x.to_string()),
        Some(Scalar::Text(s)) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
    })
}
