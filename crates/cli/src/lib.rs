//! Helpers shared by the command-line binaries.

use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use interceptor_sim::config::{self, BodyRegistry, EngineSettings};

/// Route `log` output through `env_logger`; `RUST_LOG` controls verbosity.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .try_init();
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC); `None` means now.
pub fn parse_instant(value: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
    let Some(text) = value else {
        return Ok(Utc::now());
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("'{text}' is neither RFC 3339 nor YYYY-MM-DD"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow::anyhow!("'{text}' has no midnight"))
}

/// Unix milliseconds of an instant, as the engine expects them.
pub fn epoch_millis(instant: &DateTime<Utc>) -> f64 {
    instant.timestamp_millis() as f64
}

/// Load the body registry from `path`, or the bundled registry when absent.
pub fn load_registry(path: Option<&Path>) -> anyhow::Result<BodyRegistry> {
    match path {
        Some(path) => BodyRegistry::load(path)
            .with_context(|| format!("loading bodies from {}", path.display())),
        None => BodyRegistry::builtin().context("loading bundled body registry"),
    }
}

/// Load engine settings from `path`, or defaults when absent.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<EngineSettings> {
    match path {
        Some(path) => config::load_settings(path)
            .with_context(|| format!("loading settings from {}", path.display())),
        None => Ok(EngineSettings::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dates_and_timestamps() {
        let midnight = parse_instant(Some("2000-01-01")).unwrap();
        assert_eq!(epoch_millis(&midnight), 946_684_800_000.0);
        let noon = parse_instant(Some("2000-01-01T12:00:00Z")).unwrap();
        assert_eq!(epoch_millis(&noon), 946_728_000_000.0);
        assert!(parse_instant(Some("yesterday")).is_err());
    }
}
