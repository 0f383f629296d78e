use crate::analysis::champion_stats::ChampionDetail;
use crate::analysis::exceedance::{ExceedanceReport, ExceedanceRow};
use crate::data::store::StoreSummary;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct DetailRow {
    patch: String,
    date: String,
    #[tabled(rename = "WR %")]
    win_rate: String,
    #[tabled(rename = "Presence %")]
    presence: String,
    #[tabled(rename = "BR %")]
    ban_rate: String,
    games: String,
    picks: String,
    bans: String,
    #[tabled(rename = "no presence")]
    no_presence: String,
}

#[derive(Tabled)]
struct ExceedanceLine {
    rank: String,
    champion: String,
    patches: String,
    released: String,
    lifespan: String,
    ratio: String,
}

fn pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}", v)).unwrap_or_else(|| "-".to_string())
}

fn value_at(detail: &ChampionDetail, series_name: &str, row: usize) -> Option<f64> {
    detail
        .win_rates
        .iter()
        .chain(&detail.presence)
        .find(|s| s.name == series_name)
        .and_then(|s| s.points.get(row))
        .and_then(|p| p.value)
}

pub fn display_champion_detail(detail: &ChampionDetail) {
    let champ = &detail.champion;
    println!("\n{}", format!("📈 {} Pro Stats", champ).bold().cyan());
    println!("{}\n", "=".repeat(80).cyan());

    let wr_name = format!("{} WR", champ);
    let presence_name = format!("{} Presence", champ);
    let br_name = format!("{} BR", champ);

    let mut rows = vec![];
    for (idx, game) in detail.games.iter().enumerate() {
        let no_presence = if game.corrupt {
            format!("{:.0} ⚠", game.no_presence).red().to_string()
        } else {
            format!("{:.0}", game.no_presence)
        };

        rows.push(DetailRow {
            patch: game.patch.to_string(),
            date: game.date.to_string(),
            win_rate: pct(value_at(detail, &wr_name, idx)),
            presence: pct(value_at(detail, &presence_name, idx)),
            ban_rate: pct(value_at(detail, &br_name, idx)),
            games: format!("{:.0}", game.games),
            picks: format!("{:.0}", game.picks).green().to_string(),
            bans: format!("{:.0}", game.bans).yellow().to_string(),
            no_presence,
        });
    }

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);

    let corrupt = detail.corrupt_patches();
    if !corrupt.is_empty() {
        let patches: Vec<String> = corrupt.iter().map(|p| p.to_string()).collect();
        println!(
            "\n  {} Picks + bans exceed games played on patch {}",
            "⚠️".red(),
            patches.join(", ")
        );
    }

    println!();
}

fn exceedance_table(rows: &[ExceedanceRow]) -> Table {
    let lines: Vec<ExceedanceLine> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let champion = if row.highlighted {
                row.champion.red().bold().to_string()
            } else {
                row.champion.clone()
            };
            let ratio = if row.stale_lifespan {
                format!("{:.3} ⚠", row.ratio).yellow().to_string()
            } else {
                format!("{:.3}", row.ratio)
            };
            ExceedanceLine {
                rank: format!("#{}", idx + 1),
                champion,
                patches: row.count.to_string(),
                released: row.release_patch.clone().unwrap_or_else(|| "-".to_string()),
                lifespan: format!("{:.0}", row.lifespan_patches),
                ratio,
            }
        })
        .collect();

    let mut table = Table::new(lines);
    table.with(Style::rounded());
    table
}

pub fn display_exceedance(report: &ExceedanceReport, by_ratio: bool) {
    let (title, rows) = if by_ratio {
        (
            format!(
                "Ratio of Lifespan Where Each Champion Exceeds {}% {}",
                report.threshold, report.kpi
            ),
            &report.by_ratio,
        )
    } else {
        (
            format!(
                "Total Patches Where Each Champion Exceeds {}% {}",
                report.threshold, report.kpi
            ),
            &report.by_count,
        )
    };

    println!("\n{}", format!("📊 {}", title).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if rows.is_empty() {
        println!("{}", "No champions in this table".yellow());
        return;
    }

    println!("{}", exceedance_table(rows));

    if let Some(row) = report.row(&report.highlighted) {
        println!(
            "\n{} {} reached {}% {} on {} patches ({:.1}% of its lifespan)",
            "▶".red(),
            row.champion.bold(),
            report.threshold,
            report.kpi,
            row.count,
            row.ratio * 100.0
        );
    }

    let stale = rows.iter().filter(|r| r.stale_lifespan).count();
    if stale > 0 {
        println!(
            "\n  {} {} champion(s) exceed their release lifespan; release metadata looks stale",
            "⚠️".yellow(),
            stale
        );
    }
    println!();
}

pub fn display_champion_list(champions: &[String], summary: &StoreSummary) {
    println!(
        "\n{}",
        format!(
            "🎮 {} champions across {} patches ({} with release metadata)",
            summary.champions, summary.patches, summary.releases
        )
        .bold()
        .cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());
    for champion in champions {
        println!("  {}", champion);
    }
    println!();
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    eprintln!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}
