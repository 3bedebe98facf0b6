//! Loading record files and explicit run parameters.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use agrolytics_core::AnalyticsConfig;
use agrolytics_health::parse_timestamp;

/// Read and decode a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_json(&text).with_context(|| format!("failed to decode {}", path.display()))
}

pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

/// Load thresholds from TOML, or use the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalyticsConfig> {
    let Some(path) = path else {
        return Ok(AnalyticsConfig::default());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&text).with_context(|| format!("invalid config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<AnalyticsConfig> {
    let config: AnalyticsConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Resolve the reference instant: the explicit value if given, otherwise the
/// run's single clock sample.
pub fn resolve_now(explicit: Option<&str>, fallback: DateTime<Utc>) -> Result<DateTime<Utc>> {
    match explicit {
        None => Ok(fallback),
        Some(raw) => parse_timestamp(raw).ok_or_else(|| anyhow!("unparseable --now value `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn explicit_now_overrides_clock() {
        let clock = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let now = resolve_now(Some("2025-06-15"), clock).unwrap();
        assert_eq!(now, Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap());
        assert_eq!(resolve_now(None, clock).unwrap(), clock);
        assert!(resolve_now(Some("soon"), clock).is_err());
    }

    #[test]
    fn config_is_validated() {
        let cfg = parse_config("[variance]\nalert_ratio = 0.25\n").unwrap();
        assert_eq!(cfg.variance.alert_ratio, 0.25);

        let err = parse_config("[health]\nactive_max_days = 9\npending_max_days = 2\n").unwrap_err();
        assert!(err.to_string().contains("pending_max_days"));
    }

    #[test]
    fn missing_config_path_means_defaults() {
        assert_eq!(load_config(None).unwrap(), AnalyticsConfig::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_json::<Vec<u8>>(Path::new("/nonexistent/agrolytics.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/agrolytics.json"));
    }
}
