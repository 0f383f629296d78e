use crate::error::AppError;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Metric family scanned by the exceedance view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Kpi {
    #[serde(rename = "Presence")]
    Presence,
    #[serde(rename = "Win Rate")]
    WinRate,
    #[serde(rename = "Ban Rate")]
    BanRate,
}

impl Kpi {
    pub fn label(&self) -> &'static str {
        match self {
            Kpi::Presence => "Presence",
            Kpi::WinRate => "Win Rate",
            Kpi::BanRate => "Ban Rate",
        }
    }
}

impl fmt::Display for Kpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Kpi {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "presence" => Ok(Kpi::Presence),
            "winrate" | "wr" => Ok(Kpi::WinRate),
            "banrate" | "br" => Ok(Kpi::BanRate),
            _ => Err(AppError::UnknownKpi(s.to_string())),
        }
    }
}
