use crate::analysis::kpi::Kpi;
use crate::error::AppError;
use std::env;
use std::path::PathBuf;

pub const DEFAULT_CHAMPION: &str = "Aatrox";
pub const DEFAULT_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub default_champion: String,
    pub default_threshold: f64,
    pub default_kpi: Kpi,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            default_champion: DEFAULT_CHAMPION.to_string(),
            default_threshold: DEFAULT_THRESHOLD,
            default_kpi: Kpi::Presence,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(dir) = lookup("LOL_META_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(champion) = lookup("LOL_META_DEFAULT_CHAMPION") {
            config.default_champion = champion;
        }

        if let Some(raw) = lookup("LOL_META_THRESHOLD") {
            let threshold: f64 = raw.trim().parse().map_err(|_| {
                AppError::ConfigError(format!("LOL_META_THRESHOLD is not a number: {}", raw))
            })?;
            if !threshold.is_finite() {
                return Err(AppError::ConfigError(format!(
                    "LOL_META_THRESHOLD must be finite, got {}",
                    raw
                )));
            }
            config.default_threshold = threshold;
        }

        if let Some(raw) = lookup("LOL_META_KPI") {
            config.default_kpi = raw
                .parse()
                .map_err(|e: AppError| AppError::ConfigError(e.to_string()))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.default_champion, "Aatrox");
        assert_eq!(config.default_threshold, 50.0);
        assert_eq!(config.default_kpi, Kpi::Presence);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("LOL_META_DATA_DIR", "/tmp/meta"),
            ("LOL_META_DEFAULT_CHAMPION", "Ahri"),
            ("LOL_META_THRESHOLD", "35.5"),
            ("LOL_META_KPI", "Ban Rate"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/meta"));
        assert_eq!(config.default_champion, "Ahri");
        assert_eq!(config.default_threshold, 35.5);
        assert_eq!(config.default_kpi, Kpi::BanRate);
    }

    #[test]
    fn test_bad_threshold_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("LOL_META_THRESHOLD", "lots")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));

        let err = Config::from_lookup(lookup_from(&[("LOL_META_THRESHOLD", "NaN")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_bad_kpi_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[("LOL_META_KPI", "Kill Rate")])).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
