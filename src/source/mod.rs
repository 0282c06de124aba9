//! Standings sources: where raw per-group records come from, and loading all groups at once.

mod csv_dir;
mod fallback;
mod json_dir;
mod memory;
mod record;

pub use csv_dir::{parse_standings_csv, CsvDirSource};
pub use fallback::FallbackSource;
pub use json_dir::{parse_standings_json, JsonDirSource};
pub use memory::MemorySource;
pub use record::{RawTeamRecord, UNKNOWN_TEAM_NAME};

use crate::models::{Group, Team, TeamId};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;

/// Why a source could not produce records for a group.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SourceError {
    /// File missing or unreadable.
    Io { path: PathBuf, message: String },
    /// Got an HTML page where JSON was expected (typically an error or login page).
    HtmlPayload,
    /// Payload could not be parsed.
    Parse(String),
    /// Payload parsed but contains no team rows.
    NoTeams,
    /// A fallback chain with nothing in it.
    NoSources,
    /// The group repeats a team id already used in this load.
    DuplicateTeamId(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Io { path, message } => {
                write!(f, "Cannot read {}: {}", path.display(), message)
            }
            SourceError::HtmlPayload => write!(f, "HTML response instead of JSON"),
            SourceError::Parse(message) => write!(f, "Invalid payload: {}", message),
            SourceError::NoTeams => write!(f, "No teams found in the response"),
            SourceError::NoSources => write!(f, "No data source configured"),
            SourceError::DuplicateTeamId(id) => write!(f, "Duplicate team id '{}'", id),
        }
    }
}

impl std::error::Error for SourceError {}

/// Provides the raw standings of one group at a time.
pub trait StandingsSource {
    /// Short description for logs.
    fn name(&self) -> String;

    fn load_group(&self, group: Group) -> Result<Vec<RawTeamRecord>, SourceError>;
}

/// A group that could not be loaded, with the reason reported by its source.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GroupLoadError {
    pub group: Group,
    pub reason: String,
}

impl std::fmt::Display for GroupLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.group, self.reason)
    }
}

/// Outcome of loading every group: the teams that loaded, and the groups that did not.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    pub teams: Vec<Team>,
    pub errors: Vec<GroupLoadError>,
}

/// Load `groups` one after another. A failing group is recorded and skipped; the others
/// are still returned.
///
/// Team ids must be unique across the whole load: a group repeating an id (its own or
/// one from an earlier group) is rejected as a whole.
pub fn load_all_groups(source: &dyn StandingsSource, groups: &[Group]) -> LoadReport {
    let mut report = LoadReport::default();
    let mut seen: HashSet<TeamId> = HashSet::new();
    for &group in groups {
        let loaded = source
            .load_group(group)
            .and_then(|records| unique_teams(records, group, &seen));
        match loaded {
            Ok(teams) => {
                log::info!(
                    "Group {}: {} teams loaded from {}",
                    group,
                    teams.len(),
                    source.name()
                );
                seen.extend(teams.iter().map(|t| t.id.clone()));
                report.teams.extend(teams);
            }
            Err(e) => {
                log::warn!("Group {}: {}", group, e);
                report.errors.push(GroupLoadError {
                    group,
                    reason: e.to_string(),
                });
            }
        }
    }
    report
}

fn unique_teams(
    records: Vec<RawTeamRecord>,
    group: Group,
    seen: &HashSet<TeamId>,
) -> Result<Vec<Team>, SourceError> {
    let mut ids: HashSet<TeamId> = HashSet::new();
    let teams: Vec<Team> = records.into_iter().map(|r| r.into_team(group)).collect();
    for team in &teams {
        if seen.contains(&team.id) || !ids.insert(team.id.clone()) {
            return Err(SourceError::DuplicateTeamId(team.id.clone()));
        }
    }
    Ok(teams)
}

/// One human-readable summary of all load failures; empty when nothing failed.
pub fn format_load_errors(errors: &[GroupLoadError], loaded_teams: usize) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let error_list = errors
        .iter()
        .map(|e| format!("• {}", e))
        .collect::<Vec<_>>()
        .join("\n");
    if loaded_teams == 0 {
        format!(
            "Could not load data for any group.\n\nErrors:\n{}\n\nPossible causes:\n\
             • standings files missing or unreadable\n\
             • provider payload changed shape\n\
             • data source unreachable",
            error_list
        )
    } else {
        format!(
            "Loaded only {} teams.\n\nErrors for:\n{}",
            loaded_teams, error_list
        )
    }
}
