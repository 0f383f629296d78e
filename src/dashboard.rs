use crate::analysis::champion_stats::{compute_champion_detail, ChampionDetail};
use crate::analysis::exceedance::{compute_exceedance, ExceedanceReport};
use crate::analysis::kpi::Kpi;
use crate::chart::{self, Figure};
use crate::config::Config;
use crate::data::store::DataStore;
use crate::error::AppError;
use std::path::{Path, PathBuf};

/// User selections; `None` falls back to the configured default.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub champion: Option<String>,
    pub threshold: Option<f64>,
    pub kpi: Option<Kpi>,
}

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub champion: String,
    pub detail: ChampionDetail,
    pub exceedance: ExceedanceReport,
}

impl DashboardView {
    pub fn figures(&self) -> [(&'static str, Figure); 3] {
        [
            (chart::MAIN_GRAPH, chart::champion_figure(&self.detail)),
            (chart::PRESENCE_NOMINAL, chart::count_figure(&self.exceedance)),
            (chart::PRESENCE_LIFESPAN, chart::ratio_figure(&self.exceedance)),
        ]
    }

    pub fn write_figures(&self, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        self.figures()
            .iter()
            .map(|(name, figure)| chart::write_figure(dir, name, figure))
            .collect()
    }
}

/// Answers filter changes from a store that is never written to.
pub struct Dashboard<'a> {
    store: &'a DataStore,
    config: &'a Config,
}

impl<'a> Dashboard<'a> {
    pub fn new(store: &'a DataStore, config: &'a Config) -> Self {
        Dashboard { store, config }
    }

    /// Champion used when nothing is selected: the configured default if the
    /// data knows it, otherwise the first champion alphabetically.
    pub fn default_champion(&self) -> Result<String, AppError> {
        if self.store.has_champion(&self.config.default_champion) {
            return Ok(self.config.default_champion.clone());
        }
        let first = self
            .store
            .champion_list()
            .first()
            .cloned()
            .ok_or_else(|| AppError::UnknownChampion(self.config.default_champion.clone()))?;
        tracing::warn!(
            configured = %self.config.default_champion,
            using = %first,
            "Default champion not in data"
        );
        Ok(first)
    }

    pub fn resolve_champion(&self, filters: &Filters) -> Result<String, AppError> {
        match &filters.champion {
            Some(name) => Ok(name.clone()),
            None => self.default_champion(),
        }
    }

    pub fn detail(&self, filters: &Filters) -> Result<ChampionDetail, AppError> {
        let champion = self.resolve_champion(filters)?;
        compute_champion_detail(self.store, &champion)
    }

    pub fn exceedance(&self, filters: &Filters) -> Result<ExceedanceReport, AppError> {
        let champion = self.resolve_champion(filters)?;
        compute_exceedance(
            self.store,
            filters.kpi.unwrap_or(self.config.default_kpi),
            filters.threshold.unwrap_or(self.config.default_threshold),
            &champion,
        )
    }

    pub fn render(&self, filters: &Filters) -> Result<DashboardView, AppError> {
        let champion = self.resolve_champion(filters)?;
        let resolved = Filters {
            champion: Some(champion.clone()),
            ..filters.clone()
        };
        Ok(DashboardView {
            detail: self.detail(&resolved)?,
            exceedance: self.exceedance(&resolved)?,
            champion,
        })
    }
}
