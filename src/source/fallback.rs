//! Try several sources in order until one has the group.

use crate::models::Group;
use crate::source::{RawTeamRecord, SourceError, StandingsSource};

/// First source that succeeds wins; if all fail, the last error is reported.
#[derive(Default)]
pub struct FallbackSource {
    sources: Vec<Box<dyn StandingsSource + Send + Sync>>,
}

impl FallbackSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, source: impl StandingsSource + Send + Sync + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl StandingsSource for FallbackSource {
    fn name(&self) -> String {
        let names: Vec<String> = self.sources.iter().map(|s| s.name()).collect();
        format!("fallback[{}]", names.join(", "))
    }

    fn load_group(&self, group: Group) -> Result<Vec<RawTeamRecord>, SourceError> {
        let mut last_error = SourceError::NoSources;
        for source in &self.sources {
            match source.load_group(group) {
                Ok(records) => return Ok(records),
                Err(e) => {
                    log::debug!("Group {}: {} failed ({}), trying next", group, source.name(), e);
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}
