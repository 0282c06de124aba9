//! In-memory standings, e.g. sample data or records fetched by the caller.

use crate::models::Group;
use crate::source::{RawTeamRecord, SourceError, StandingsSource};
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    groups: HashMap<Group, Vec<RawTeamRecord>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: Group, records: Vec<RawTeamRecord>) -> Self {
        self.groups.insert(group, records);
        self
    }
}

impl StandingsSource for MemorySource {
    fn name(&self) -> String {
        "memory".to_string()
    }

    fn load_group(&self, group: Group) -> Result<Vec<RawTeamRecord>, SourceError> {
        match self.groups.get(&group) {
            Some(records) if !records.is_empty() => Ok(records.clone()),
            _ => Err(SourceError::NoTeams),
        }
    }
}
