//! Plotly-compatible figure JSON for the three dashboard charts.

use crate::analysis::champion_stats::{ChampionDetail, GameBreakdown, Series};
use crate::analysis::exceedance::{ExceedanceReport, ExceedanceRow};
use crate::error::AppError;
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

pub const MAIN_GRAPH: &str = "main_graph";
pub const PRESENCE_NOMINAL: &str = "presence_nominal";
pub const PRESENCE_LIFESPAN: &str = "presence_lifespan";

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Color {
    Single(&'static str),
    PerBar(Vec<&'static str>),
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: Color,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: String,
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<&'static str>,
    pub marker: Marker,
    pub xaxis: &'static str,
    pub yaxis: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Value,
}

impl Figure {
    pub fn title(&self) -> Option<&str> {
        self.layout.pointer("/title/text").and_then(Value::as_str)
    }
}

fn line(series: &Series, color: &'static str, yaxis: &'static str) -> Trace {
    Trace {
        kind: "scatter",
        name: series.name.clone(),
        x: series.points.iter().map(|p| p.date.to_string()).collect(),
        y: series.values(),
        hovertext: Some(series.points.iter().map(|p| p.patch.to_string()).collect()),
        hoverinfo: Some("text+y"),
        marker: Marker {
            color: Color::Single(color),
        },
        xaxis: "x",
        yaxis,
    }
}

fn game_bars<F>(games: &[GameBreakdown], name: &str, color: &'static str, value: F) -> Trace
where
    F: Fn(&GameBreakdown) -> f64,
{
    Trace {
        kind: "bar",
        name: name.to_string(),
        x: games.iter().map(|g| g.date.to_string()).collect(),
        y: games.iter().map(|g| Some(value(g))).collect(),
        hovertext: Some(games.iter().map(|g| g.patch.to_string()).collect()),
        hoverinfo: Some("text+y"),
        marker: Marker {
            color: Color::Single(color),
        },
        xaxis: "x",
        yaxis: "y3",
    }
}

/// Three stacked panels sharing the date axis: win rates, presence, game counts.
pub fn champion_figure(detail: &ChampionDetail) -> Figure {
    const WIN_COLORS: [&str; 3] = ["Red", "RoyalBlue", "ForestGreen"];
    const PRESENCE_COLORS: [&str; 4] = ["DarkOrange", "Red", "RoyalBlue", "ForestGreen"];

    let mut data: Vec<Trace> = detail
        .win_rates
        .iter()
        .zip(WIN_COLORS)
        .map(|(s, color)| line(s, color, "y"))
        .collect();
    data.extend(
        detail
            .presence
            .iter()
            .zip(PRESENCE_COLORS)
            .map(|(s, color)| line(s, color, "y2")),
    );
    data.push(game_bars(&detail.games, "Bans", "DarkOrange", |g| g.bans));
    data.push(game_bars(&detail.games, "Picks", "Lime", |g| g.picks));
    data.push(game_bars(&detail.games, "No Presence", "Black", |g| g.no_presence));

    let layout = json!({
        "title": {
            "text": format!("{} Pro Stats", detail.champion),
            "x": 0.5,
            "xanchor": "center"
        },
        "barmode": "stack",
        "hovermode": "x unified",
        "xaxis": { "title": { "text": "Current Patch" }, "anchor": "y3" },
        "yaxis": { "title": { "text": "Win Rate %" }, "domain": [0.68, 1.0] },
        "yaxis2": { "title": { "text": "BP Presence %" }, "domain": [0.34, 0.66] },
        "yaxis3": { "title": { "text": "# of Games" }, "domain": [0.0, 0.32] }
    });

    Figure { data, layout }
}

fn exceedance_bars(
    rows: &[ExceedanceRow],
    title: String,
    y_label: &str,
    value: impl Fn(&ExceedanceRow) -> f64,
) -> Figure {
    let trace = Trace {
        kind: "bar",
        name: y_label.to_string(),
        x: rows.iter().map(|r| r.champion.clone()).collect(),
        y: rows.iter().map(|r| Some(value(r))).collect(),
        hovertext: None,
        hoverinfo: None,
        marker: Marker {
            color: Color::PerBar(rows.iter().map(ExceedanceRow::color).collect()),
        },
        xaxis: "x",
        yaxis: "y",
    };

    let layout = json!({
        "title": { "text": title, "x": 0.5, "xanchor": "center" },
        "showlegend": false,
        "xaxis": { "visible": false, "showticklabels": false },
        "yaxis": { "title": { "text": y_label } }
    });

    Figure {
        data: vec![trace],
        layout,
    }
}

/// Bar chart of qualifying patch counts, ascending.
pub fn count_figure(report: &ExceedanceReport) -> Figure {
    exceedance_bars(
        &report.by_count,
        format!(
            "Total Patches Where Each Champion Exceeds {}% {}",
            report.threshold, report.kpi
        ),
        "Frequency",
        |r| r.count as f64,
    )
}

/// Bar chart of qualifying patches as a share of lifespan, ascending.
pub fn ratio_figure(report: &ExceedanceReport) -> Figure {
    exceedance_bars(
        &report.by_ratio,
        format!(
            "Ratio of Lifespan Where Each Champion Exceeds {}% {}",
            report.threshold, report.kpi
        ),
        "Ratio of Lifespan",
        |r| r.ratio,
    )
}

pub fn write_figure(dir: &Path, name: &str, figure: &Figure) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir).map_err(|source| AppError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}.json", name));
    let json = serde_json::to_string_pretty(figure)
        .map_err(|e| AppError::JsonError(format!("Failed to serialize {}: {}", name, e)))?;
    fs::write(&path, json).map_err(|source| AppError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        title = figure.title().unwrap_or(name),
        "Wrote figure"
    );
    Ok(path)
}
