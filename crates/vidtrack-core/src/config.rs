use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_DATA_PATH: &str = "./output/video_metrics.json";

/// Four runs a day: 08:00, 12:00, 16:00 and 20:00 (seconds field first).
pub const DEFAULT_SCHEDULE: &str = "0 0 8,12,16,20 * * *";

/// Load runner configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load runner configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so the
/// parsing rules can be tested against a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let data_path = or_default("VIDTRACK_DATA_PATH", DEFAULT_DATA_PATH);
    if data_path.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "VIDTRACK_DATA_PATH".to_string(),
            reason: "path must not be empty".to_string(),
        });
    }

    let log_level = or_default("VIDTRACK_LOG_LEVEL", "info");
    let scrape_command = lookup("VIDTRACK_SCRAPE_COMMAND")
        .ok()
        .filter(|cmd| !cmd.trim().is_empty());
    let schedule = parse_schedule(&or_default("VIDTRACK_SCHEDULE", DEFAULT_SCHEDULE))?;
    let summary_top_n = parse_usize("VIDTRACK_SUMMARY_TOP_N", "3")?;

    Ok(AppConfig {
        data_path: PathBuf::from(data_path),
        log_level,
        scrape_command,
        schedule,
        summary_top_n,
    })
}

/// Checks the field count of a cron expression. The scheduler expects a
/// leading seconds field and an optional trailing year field.
fn parse_schedule(raw: &str) -> Result<String, ConfigError> {
    let expr = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let fields = expr.split(' ').filter(|f| !f.is_empty()).count();
    if !(6..=7).contains(&fields) {
        return Err(ConfigError::InvalidEnvVar {
            var: "VIDTRACK_SCHEDULE".to_string(),
            reason: format!("expected 6 or 7 cron fields, got {fields}"),
        });
    }
    Ok(expr)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
