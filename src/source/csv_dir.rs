//! CSV standings files, one per group (`<dir>/A.csv` ...), with a header row.

use crate::models::Group;
use crate::source::{RawTeamRecord, SourceError, StandingsSource};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

/// Reads `<dir>/<group>.csv`. Headers may use provider (`sw`, `gp`, ...) or domain names.
#[derive(Clone, Debug)]
pub struct CsvDirSource {
    dir: PathBuf,
}

impl CsvDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl StandingsSource for CsvDirSource {
    fn name(&self) -> String {
        format!("csv:{}", self.dir.display())
    }

    fn load_group(&self, group: Group) -> Result<Vec<RawTeamRecord>, SourceError> {
        let path = self.dir.join(format!("{}.csv", group));
        let file = File::open(&path).map_err(|e| SourceError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?;
        parse_standings_csv(file)
    }
}

/// Parse CSV standings into raw records.
pub fn parse_standings_csv<R: Read>(reader: R) -> Result<Vec<RawTeamRecord>, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let records = rdr
        .deserialize()
        .collect::<Result<Vec<RawTeamRecord>, csv::Error>>()
        .map_err(|e| SourceError::Parse(e.to_string()))?;
    if records.is_empty() {
        return Err(SourceError::NoTeams);
    }
    Ok(records)
}
