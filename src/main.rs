mod analysis;
mod chart;
mod config;
mod dashboard;
mod data;
mod display;
mod error;

use analysis::kpi::Kpi;
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use config::Config;
use dashboard::{Dashboard, Filters};
use data::store::{load_all, DataSources};
use display::output::{
    display_champion_detail, display_champion_list, display_error, display_exceedance,
    display_info, display_success,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortBy {
    Count,
    Ratio,
}

#[derive(Parser, Debug)]
#[command(name = "LoL Meta")]
#[command(about = "Professional pick/ban/win rate analysis across patches", long_about = None)]
struct Args {
    /// Directory holding the pre-aggregated CSV tables (default: $LOL_META_DATA_DIR or ./data)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every champion found in the pick and ban tables
    Champions,

    /// Per-patch win rate, presence and pick/ban counts for one champion
    Detail {
        /// Champion name (default: configured default champion)
        champion: Option<String>,
    },

    /// Patches where each champion's KPI reaches a threshold
    Exceedance {
        /// Presence, Win Rate or Ban Rate
        #[arg(short, long)]
        kpi: Option<Kpi>,

        /// Percentage threshold, inclusive (default: 50)
        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<f64>,

        /// Champion to highlight
        #[arg(short, long)]
        champion: Option<String>,

        /// Order rows by raw count or by lifespan ratio
        #[arg(short, long, value_enum, default_value = "count")]
        sort: SortBy,
    },

    /// Full dashboard: champion detail plus both exceedance views
    Dashboard {
        #[arg(short, long)]
        champion: Option<String>,

        #[arg(short, long)]
        kpi: Option<Kpi>,

        #[arg(short, long, allow_negative_numbers = true)]
        threshold: Option<f64>,

        /// Write the three chart figures as JSON into this directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lol_meta=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    if args.format == OutputFormat::Table {
        display_info(&format!("Loading datasets from {}", config.data_dir.display()));
    }
    let store = load_all(&DataSources::in_dir(&config.data_dir))
        .with_context(|| format!("failed to load datasets from {}", config.data_dir.display()))?;
    let dashboard = Dashboard::new(&store, &config);

    let command = args.command.unwrap_or(Command::Dashboard {
        champion: None,
        kpi: None,
        threshold: None,
        out: None,
    });

    match command {
        Command::Champions => match args.format {
            OutputFormat::Json => print_json(&store.champion_list())?,
            OutputFormat::Table => display_champion_list(store.champion_list(), &store.summary()),
        },
        Command::Detail { champion } => {
            let detail = dashboard.detail(&Filters {
                champion,
                ..Filters::default()
            })?;
            match args.format {
                OutputFormat::Json => print_json(&detail)?,
                OutputFormat::Table => display_champion_detail(&detail),
            }
        }
        Command::Exceedance {
            kpi,
            threshold,
            champion,
            sort,
        } => {
            let report = dashboard.exceedance(&Filters {
                champion,
                threshold,
                kpi,
            })?;
            match args.format {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Table => display_exceedance(&report, sort == SortBy::Ratio),
            }
        }
        Command::Dashboard {
            champion,
            kpi,
            threshold,
            out,
        } => {
            let view = dashboard.render(&Filters {
                champion,
                threshold,
                kpi,
            })?;

            match args.format {
                OutputFormat::Json => {
                    let figures: serde_json::Map<String, serde_json::Value> = view
                        .figures()
                        .into_iter()
                        .map(|(name, figure)| -> anyhow::Result<(String, serde_json::Value)> {
                            Ok((name.to_string(), serde_json::to_value(figure)?))
                        })
                        .collect::<anyhow::Result<_>>()?;
                    print_json(&figures)?;
                }
                OutputFormat::Table => {
                    display_champion_detail(&view.detail);
                    display_exceedance(&view.exceedance, false);
                    display_exceedance(&view.exceedance, true);
                }
            }

            if let Some(dir) = out {
                let paths = view.write_figures(&dir)?;
                display_success(&format!("Wrote {} figures to {}", paths.len(), dir.display()));
            }
        }
    }

    Ok(())
}
