use crate::data::patch::Patch;
use crate::data::store::{DataStore, GAMES_COLUMN, TOP_20_COLUMN, TOP_5_COLUMN};
use crate::data::table::PatchTable;
use crate::error::AppError;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub patch: Patch,
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// One named line of the detail chart, in the row order of its source table.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Values of `column` along the table's own patch and date axis.
    fn from_column(name: String, table: &PatchTable, column: &str) -> Result<Self, AppError> {
        let dates = table.require_dates()?;
        let col = table.column_position(column);
        if col.is_none() {
            tracing::debug!(table = %table.name(), column, "Column absent, series left empty");
        }

        let points = table
            .patches()
            .iter()
            .zip(dates)
            .enumerate()
            .map(|(row, (patch, &date))| SeriesPoint {
                patch: patch.clone(),
                date,
                value: col.and_then(|c| table.cell(row, c)),
            })
            .collect();

        Ok(Series { name, points })
    }

    /// Values of `column` in `values`, placed on the patch and date axis of `axis`.
    fn aligned(
        name: String,
        axis: &PatchTable,
        values: &PatchTable,
        column: &str,
    ) -> Result<Self, AppError> {
        let dates = axis.require_dates()?;
        let points = axis
            .patches()
            .iter()
            .zip(dates)
            .map(|(patch, &date)| SeriesPoint {
                patch: patch.clone(),
                date,
                value: values.value(patch, column),
            })
            .collect();

        Ok(Series { name, points })
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Pick, ban and no-presence game counts for one patch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameBreakdown {
    pub patch: Patch,
    pub date: NaiveDate,
    pub games: f64,
    pub picks: f64,
    pub bans: f64,
    /// Games with neither a pick nor a ban; never negative.
    pub no_presence: f64,
    /// Set when picks + bans exceed the games played that patch.
    pub corrupt: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChampionDetail {
    pub champion: String,
    pub win_rates: Vec<Series>,
    pub presence: Vec<Series>,
    pub games: Vec<GameBreakdown>,
}

impl ChampionDetail {
    pub fn corrupt_patches(&self) -> Vec<&Patch> {
        self.games
            .iter()
            .filter(|g| g.corrupt)
            .map(|g| &g.patch)
            .collect()
    }
}

pub fn compute_champion_detail(store: &DataStore, champion: &str) -> Result<ChampionDetail, AppError> {
    if !store.has_champion(champion) {
        return Err(AppError::UnknownChampion(champion.to_string()));
    }

    let win_rates = vec![
        Series::from_column("Top 5 WR".to_string(), &store.win_stats, TOP_5_COLUMN)?,
        Series::from_column("Top 20 WR".to_string(), &store.win_stats, TOP_20_COLUMN)?,
        Series::from_column(format!("{} WR", champion), &store.win_pct_sorted, champion)?,
    ];

    let presence = vec![
        Series::from_column(format!("{} BR", champion), &store.ban_pct_sorted, champion)?,
        Series::aligned(
            "Top 5 Presence".to_string(),
            &store.presence_pct_sorted,
            &store.presence_stats,
            TOP_5_COLUMN,
        )?,
        Series::aligned(
            "Top 20 Presence".to_string(),
            &store.presence_pct_sorted,
            &store.presence_stats,
            TOP_20_COLUMN,
        )?,
        Series::from_column(
            format!("{} Presence", champion),
            &store.presence_pct_sorted,
            champion,
        )?,
    ];

    let games = game_breakdown(store, champion)?;

    tracing::debug!(champion, patches = games.len(), "Computed champion detail");

    Ok(ChampionDetail {
        champion: champion.to_string(),
        win_rates,
        presence,
        games,
    })
}

fn game_breakdown(store: &DataStore, champion: &str) -> Result<Vec<GameBreakdown>, AppError> {
    let stats = &store.pick_stats;
    let dates = stats.require_dates()?;
    let games_col = stats.require_column(GAMES_COLUMN)?;

    let mut rows = Vec::with_capacity(stats.len());
    for (row, (patch, &date)) in stats.patches().iter().zip(dates).enumerate() {
        let games = stats.cell(row, games_col).unwrap_or_else(|| {
            tracing::warn!(patch = %patch, "No game count recorded, using 0");
            0.0
        });
        // Absent rows and empty cells both mean the champion was not drafted.
        let picks = store.pick_grouped.value(patch, champion).unwrap_or(0.0);
        let bans = store.ban_grouped.value(patch, champion).unwrap_or(0.0);

        let remaining = games - picks - bans;
        let corrupt = remaining < 0.0;
        if corrupt {
            tracing::warn!(
                champion,
                patch = %patch,
                games,
                picks,
                bans,
                "Picks and bans exceed games played"
            );
        }

        rows.push(GameBreakdown {
            patch: patch.clone(),
            date,
            games,
            picks,
            bans,
            no_presence: remaining.max(0.0),
            corrupt,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures;

    #[test]
    fn test_counts_partition_games() {
        let store = fixtures::load_store();
        for champion in store.champion_list() {
            let detail = compute_champion_detail(&store, champion).unwrap();
            for g in &detail.games {
                assert!(!g.corrupt);
                assert_eq!(g.picks + g.bans + g.no_presence, g.games);
            }
        }
    }

    #[test]
    fn test_missing_cells_count_as_zero() {
        let store = fixtures::load_store();
        let detail = compute_champion_detail(&store, "Aatrox").unwrap();
        let picks: Vec<f64> = detail.games.iter().map(|g| g.picks).collect();
        let no_presence: Vec<f64> = detail.games.iter().map(|g| g.no_presence).collect();
        assert_eq!(picks, vec![3.0, 0.0, 2.0, 5.0]);
        assert_eq!(no_presence, vec![7.0, 11.0, 4.0, 4.0]);

        // Zed has no pick column at all.
        let zed = compute_champion_detail(&store, "Zed").unwrap();
        assert!(zed.games.iter().all(|g| g.picks == 0.0));
        assert_eq!(zed.games[1].bans, 0.0);
    }

    #[test]
    fn test_series_keep_chronological_order() {
        let store = fixtures::load_store();
        let detail = compute_champion_detail(&store, "Ahri").unwrap();
        let names: Vec<&str> = detail.win_rates.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Top 5 WR", "Top 20 WR", "Ahri WR"]);

        let presence = detail.presence.last().unwrap();
        assert_eq!(presence.name, "Ahri Presence");
        assert_eq!(presence.values(), vec![Some(60.0), Some(70.0), Some(20.0), Some(55.0)]);

        let dates: Vec<NaiveDate> = detail.games.iter().map(|g| g.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_top_presence_aligned_by_patch() {
        let store = fixtures::load_store();
        let detail = compute_champion_detail(&store, "Ahri").unwrap();
        let top_5 = &detail.presence[1];
        assert_eq!(top_5.name, "Top 5 Presence");
        assert_eq!(top_5.values(), vec![Some(88.0), Some(90.5), Some(85.0), Some(92.0)]);
    }

    #[test]
    fn test_unknown_champion_is_error() {
        let store = fixtures::load_store();
        let err = compute_champion_detail(&store, "Teemo").unwrap_err();
        assert!(matches!(err, AppError::UnknownChampion(ref c) if c == "Teemo"));
    }

    #[test]
    fn test_negative_no_presence_is_flagged() {
        let store = fixtures::load_store_with(
            "pick_stats.csv",
            "patch,patch_games,Date\n\
             13.1,10,2023-01-10\n\
             13.2,3,2023-01-25\n\
             13.3,8,2023-02-08\n\
             13.4,10,2023-02-23\n",
        );
        let detail = compute_champion_detail(&store, "Ahri").unwrap();
        let flagged: Vec<&str> = detail.corrupt_patches().iter().map(|p| p.as_str()).collect();
        assert_eq!(flagged, vec!["13.2"]);
        assert_eq!(detail.games[1].no_presence, 0.0);
    }
}
