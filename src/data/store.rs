use super::release::ReleaseTable;
use super::table::PatchTable;
use crate::analysis::kpi::Kpi;
use crate::error::AppError;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const PATCH_KEY: &str = "patch";
const DATASET_COUNT: u64 = 9;

pub const GAMES_COLUMN: &str = "patch_games";
pub const TOP_5_COLUMN: &str = "top_5";
pub const TOP_20_COLUMN: &str = "top_20";

/// Locations of every dataset the dashboard reads.
#[derive(Debug, Clone)]
pub struct DataSources {
    pub pick_grouped: PathBuf,
    pub ban_grouped: PathBuf,
    pub pick_stats: PathBuf,
    pub win_stats: PathBuf,
    pub presence_stats: PathBuf,
    pub win_pct_sorted: PathBuf,
    pub presence_pct_sorted: PathBuf,
    pub ban_pct_sorted: PathBuf,
    pub champion_release: PathBuf,
}

impl DataSources {
    pub fn in_dir(dir: &Path) -> Self {
        DataSources {
            pick_grouped: dir.join("pick_grouped.csv"),
            ban_grouped: dir.join("ban_grouped.csv"),
            pick_stats: dir.join("pick_stats.csv"),
            win_stats: dir.join("win_stats.csv"),
            presence_stats: dir.join("presence_stats.csv"),
            win_pct_sorted: dir.join("win_pct_sorted.csv"),
            presence_pct_sorted: dir.join("presence_pct_sorted.csv"),
            ban_pct_sorted: dir.join("ban_pct_sorted.csv"),
            champion_release: dir.join("champion_w_release.csv"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StoreSummary {
    pub patches: usize,
    pub champions: usize,
    pub releases: usize,
}

/// Read-only view over all loaded datasets.
///
/// Built once by [`load_all`] and only ever handed out by shared reference.
#[derive(Debug)]
pub struct DataStore {
    pub pick_grouped: PatchTable,
    pub ban_grouped: PatchTable,
    pub pick_stats: PatchTable,
    pub win_stats: PatchTable,
    pub presence_stats: PatchTable,
    pub win_pct_sorted: PatchTable,
    pub presence_pct_sorted: PatchTable,
    pub ban_pct_sorted: PatchTable,
    pub releases: ReleaseTable,
    champions: Vec<String>,
}

pub fn load_all(sources: &DataSources) -> Result<DataStore, AppError> {
    let pb = ProgressBar::new(DATASET_COUNT);
    if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
        pb.set_style(style);
    }

    let load = |path: &Path| -> Result<PatchTable, AppError> {
        pb.set_message(path.display().to_string());
        let table = PatchTable::load(path, PATCH_KEY)?;
        tracing::info!(
            table = %table.name(),
            rows = table.len(),
            columns = table.columns().len(),
            "Loaded table"
        );
        pb.inc(1);
        Ok(table)
    };

    let pick_grouped = load(&sources.pick_grouped)?;
    let ban_grouped = load(&sources.ban_grouped)?;
    let pick_stats = load(&sources.pick_stats)?;
    let win_stats = load(&sources.win_stats)?;
    let presence_stats = load(&sources.presence_stats)?;
    let win_pct_sorted = load(&sources.win_pct_sorted)?;
    let presence_pct_sorted = load(&sources.presence_pct_sorted)?;
    let ban_pct_sorted = load(&sources.ban_pct_sorted)?;

    pb.set_message(sources.champion_release.display().to_string());
    let releases = ReleaseTable::load(&sources.champion_release)?;
    tracing::info!(records = releases.len(), "Loaded release metadata");
    pb.inc(1);
    pb.finish_and_clear();

    DataStore::new(
        pick_grouped,
        ban_grouped,
        pick_stats,
        win_stats,
        presence_stats,
        win_pct_sorted,
        presence_pct_sorted,
        ban_pct_sorted,
        releases,
    )
}

impl DataStore {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pick_grouped: PatchTable,
        ban_grouped: PatchTable,
        pick_stats: PatchTable,
        win_stats: PatchTable,
        presence_stats: PatchTable,
        win_pct_sorted: PatchTable,
        presence_pct_sorted: PatchTable,
        ban_pct_sorted: PatchTable,
        releases: ReleaseTable,
    ) -> Result<Self, AppError> {
        pick_stats.require_column(GAMES_COLUMN)?;
        pick_stats.require_dates()?;
        win_stats.require_column(TOP_5_COLUMN)?;
        win_stats.require_column(TOP_20_COLUMN)?;
        win_stats.require_dates()?;
        presence_stats.require_column(TOP_5_COLUMN)?;
        presence_stats.require_column(TOP_20_COLUMN)?;
        for sorted in [&win_pct_sorted, &presence_pct_sorted, &ban_pct_sorted] {
            sorted.require_dates()?;
        }

        if pick_stats.is_empty() {
            tracing::warn!("pick_stats has no rows");
        }
        if releases.is_empty() {
            tracing::warn!("Release metadata has no rows");
        }

        let champions: BTreeSet<String> = pick_grouped
            .columns()
            .iter()
            .chain(ban_grouped.columns())
            .cloned()
            .collect();

        Ok(DataStore {
            pick_grouped,
            ban_grouped,
            pick_stats,
            win_stats,
            presence_stats,
            win_pct_sorted,
            presence_pct_sorted,
            ban_pct_sorted,
            releases,
            champions: champions.into_iter().collect(),
        })
    }

    /// Champion names from the pick and ban tables, sorted lexicographically.
    pub fn champion_list(&self) -> &[String] {
        &self.champions
    }

    pub fn has_champion(&self, champion: &str) -> bool {
        self.champions.binary_search_by(|c| c.as_str().cmp(champion)).is_ok()
    }

    pub fn kpi_table(&self, kpi: Kpi) -> &PatchTable {
        match kpi {
            Kpi::Presence => &self.presence_pct_sorted,
            Kpi::WinRate => &self.win_pct_sorted,
            Kpi::BanRate => &self.ban_pct_sorted,
        }
    }

    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            patches: self.pick_stats.len(),
            champions: self.champions.len(),
            releases: self.releases.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_load_all_from_dir() {
        let dir = fixtures::write_dataset();
        let store = load_all(&DataSources::in_dir(dir.path())).unwrap();
        let summary = store.summary();
        assert_eq!(summary.patches, 4);
        assert_eq!(summary.champions, 3);
        assert_eq!(summary.releases, 3);
    }

    #[test]
    fn test_champion_list_sorted_and_deduplicated() {
        let dir = fixtures::write_dataset();
        let store = load_all(&DataSources::in_dir(dir.path())).unwrap();
        assert_eq!(store.champion_list(), &["Aatrox", "Ahri", "Zed"]);
        assert!(store.has_champion("Zed"));
        assert!(!store.has_champion("zed"));

        let again = load_all(&DataSources::in_dir(dir.path())).unwrap();
        assert_eq!(store.champion_list(), again.champion_list());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = fixtures::write_dataset();
        std::fs::remove_file(dir.path().join("win_stats.csv")).unwrap();
        let err = load_all(&DataSources::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_missing_required_column_is_fatal() {
        let dir = fixtures::write_dataset();
        std::fs::write(
            dir.path().join("pick_stats.csv"),
            "patch,games,Date\n13.1,10,2023-01-10\n",
        )
        .unwrap();
        let err = load_all(&DataSources::in_dir(dir.path())).unwrap_err();
        assert!(matches!(err, AppError::MissingColumn { ref column, .. } if column == "patch_games"));
    }

    #[test]
    fn test_kpi_table_selection() {
        let dir = fixtures::write_dataset();
        let store = load_all(&DataSources::in_dir(dir.path())).unwrap();
        assert_eq!(store.kpi_table(Kpi::WinRate).name(), "win_pct_sorted");
        assert_eq!(store.kpi_table(Kpi::Presence).name(), "presence_pct_sorted");
        assert_eq!(store.kpi_table(Kpi::BanRate).name(), "ban_pct_sorted");
    }
}
