use super::kpi::Kpi;
use crate::data::store::DataStore;
use crate::error::AppError;
use serde::Serialize;

pub const HIGHLIGHT_COLOR: &str = "Red";
pub const BASE_COLOR: &str = "DodgerBlue";

/// Rounds to `decimals` places with ties going to the even neighbour.
///
/// Scales, rounds and unscales in binary floating point, so an exact tie such
/// as `0.0625` becomes `0.062`.
pub fn round_half_even(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExceedanceRow {
    pub champion: String,
    /// Patches where the KPI was at or above the threshold.
    pub count: usize,
    pub lifespan_patches: f64,
    pub release_patch: Option<String>,
    pub ratio: f64,
    pub highlighted: bool,
    /// Ratio above 1, meaning the release metadata is behind the patch tables.
    pub stale_lifespan: bool,
}

impl ExceedanceRow {
    pub fn color(&self) -> &'static str {
        if self.highlighted {
            HIGHLIGHT_COLOR
        } else {
            BASE_COLOR
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExceedanceReport {
    pub kpi: Kpi,
    pub threshold: f64,
    pub highlighted: String,
    pub by_count: Vec<ExceedanceRow>,
    pub by_ratio: Vec<ExceedanceRow>,
}

impl ExceedanceReport {
    pub fn row(&self, champion: &str) -> Option<&ExceedanceRow> {
        self.by_count.iter().find(|r| r.champion == champion)
    }
}

/// Counts, per champion, the patches whose `kpi` value is `>= threshold`
/// and relates that count to the champion's lifespan in patches.
///
/// Patches are taken from the presence summary table and looked up by key in
/// the KPI table. An empty cell never qualifies.
pub fn compute_exceedance(
    store: &DataStore,
    kpi: Kpi,
    threshold: f64,
    highlighted: &str,
) -> Result<ExceedanceReport, AppError> {
    if !threshold.is_finite() {
        return Err(AppError::InvalidThreshold(threshold));
    }
    if !(0.0..=100.0).contains(&threshold) {
        tracing::debug!(threshold, "Threshold outside 0-100, result is all or nothing");
    }
    if !store.has_champion(highlighted) {
        return Err(AppError::UnknownChampion(highlighted.to_string()));
    }

    let table = store.kpi_table(kpi);
    let mut rows_idx = Vec::with_capacity(store.presence_stats.len());
    for patch in store.presence_stats.patches() {
        let row = table.row_of(patch).ok_or_else(|| AppError::MissingPatch {
            patch: patch.to_string(),
            table: table.name(),
        })?;
        rows_idx.push(row);
    }

    let mut rows = Vec::with_capacity(table.columns().len());
    for (col, champion) in table.columns().iter().enumerate() {
        let count = rows_idx
            .iter()
            .filter(|&&row| table.cell(row, col).is_some_and(|v| v >= threshold))
            .count();

        let release = store
            .releases
            .get(champion)
            .ok_or_else(|| AppError::MissingRelease(champion.clone()))?;
        let lifespan = release.lifespan_patches;
        if lifespan <= 0.0 || !lifespan.is_finite() {
            return Err(AppError::InvalidLifespan {
                champion: champion.clone(),
                lifespan,
            });
        }

        let ratio = round_half_even(count as f64 / lifespan, 3);
        let stale_lifespan = ratio > 1.0;
        if stale_lifespan {
            tracing::warn!(
                champion = %champion,
                count,
                lifespan,
                "Exceedance count is larger than the release lifespan"
            );
        }

        rows.push(ExceedanceRow {
            champion: champion.clone(),
            count,
            lifespan_patches: lifespan,
            release_patch: release.release_patch.clone(),
            ratio,
            highlighted: champion == highlighted,
            stale_lifespan,
        });
    }

    // Stable sorts: ties keep the column order of the KPI table.
    let mut by_count = rows.clone();
    by_count.sort_by_key(|r| r.count);
    let mut by_ratio = rows;
    by_ratio.sort_by(|a, b| a.ratio.total_cmp(&b.ratio));

    tracing::debug!(
        kpi = %kpi,
        threshold,
        champions = by_count.len(),
        "Computed exceedance"
    );

    Ok(ExceedanceReport {
        kpi,
        threshold,
        highlighted: highlighted.to_string(),
        by_count,
        by_ratio,
    })
}
