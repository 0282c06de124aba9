//! JSON standings files, one per group (`<dir>/A.json` ...).

use crate::models::Group;
use crate::source::{RawTeamRecord, SourceError, StandingsSource};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Keys that may hold the team array when it is not under `ranks.seasons[0].rank`.
const ARRAY_KEYS: [&str; 4] = ["data", "result", "classifica", "teams"];

/// Reads `<dir>/<group>.json`.
#[derive(Clone, Debug)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl StandingsSource for JsonDirSource {
    fn name(&self) -> String {
        format!("json:{}", self.dir.display())
    }

    fn load_group(&self, group: Group) -> Result<Vec<RawTeamRecord>, SourceError> {
        let path = self.dir.join(format!("{}.json", group));
        let text = fs::read_to_string(&path).map_err(|e| SourceError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        parse_standings_json(&text)
    }
}

/// Find the team rows in a provider payload.
///
/// Accepted shapes: a bare array, `ranks.seasons[0].rank`, or an array under one of
/// `data`, `result`, `classifica`, `teams`.
fn team_rows(payload: &Value) -> &[Value] {
    if let Some(rows) = payload.as_array() {
        return rows;
    }
    let season_rank = payload
        .pointer("/ranks/seasons/0/rank")
        .and_then(Value::as_array);
    if let Some(rows) = season_rank {
        return rows;
    }
    ARRAY_KEYS
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Parse a provider JSON payload into raw records.
pub fn parse_standings_json(text: &str) -> Result<Vec<RawTeamRecord>, SourceError> {
    if text.trim_start().starts_with('<') {
        return Err(SourceError::HtmlPayload);
    }
    let payload: Value =
        serde_json::from_str(text).map_err(|e| SourceError::Parse(e.to_string()))?;
    let rows = team_rows(&payload);
    if rows.is_empty() {
        return Err(SourceError::NoTeams);
    }
    rows.iter()
        .map(|row| RawTeamRecord::deserialize(row).map_err(|e| SourceError::Parse(e.to_string())))
        .collect()
}
