use crate::error::AppError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One row of the champion release metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRecord {
    #[serde(rename = "Champion")]
    pub champion: String,
    #[serde(rename = "Release Patch", alias = "release_patch", default)]
    pub release_patch: Option<String>,
    /// Patches elapsed since release; denominator of the lifespan ratio.
    #[serde(
        rename = "patches_since_release",
        alias = "Patches Since Release",
        alias = "lifespan"
    )]
    pub lifespan_patches: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ReleaseTable {
    records: Vec<ReleaseRecord>,
    by_name: HashMap<String, usize>,
}

impl ReleaseTable {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path, file)
    }

    pub fn from_reader<R: Read>(path: &Path, reader: R) -> Result<Self, AppError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = ReleaseTable::default();
        for record in rdr.deserialize::<ReleaseRecord>() {
            let record = record.map_err(|source| AppError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
            // First row wins on duplicate names, as a filtered lookup would.
            table
                .by_name
                .entry(record.champion.clone())
                .or_insert(table.records.len());
            table.records.push(record);
        }

        Ok(table)
    }

    pub fn get(&self, champion: &str) -> Option<&ReleaseRecord> {
        self.by_name.get(champion).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
