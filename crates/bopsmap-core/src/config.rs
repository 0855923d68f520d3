use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str =
    "https://southwark.bops-staging.services/api/v2/public/planning_applications/";
pub const DEFAULT_POSTCODE_API_URL: &str = "https://api.postcodes.io/postcodes";

/// Load application configuration from environment variables.
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

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let log_level = or_default("BOPSMAP_LOG_LEVEL", "info");

    let api_base_url = parse_base_url(
        "BOPSMAP_API_BASE_URL",
        &or_default("BOPSMAP_API_BASE_URL", DEFAULT_API_BASE_URL),
    )?;
    let postcode_api_url = or_default("BOPSMAP_POSTCODE_API_URL", DEFAULT_POSTCODE_API_URL)
        .trim_end_matches('/')
        .to_string();

    let page_size = parse_usize("BOPSMAP_PAGE_SIZE", "50")?;
    if page_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BOPSMAP_PAGE_SIZE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let request_timeout_secs = parse_u64("BOPSMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BOPSMAP_USER_AGENT", "bopsmap/0.1 (planning-map)");
    let inter_request_delay_ms = parse_u64("BOPSMAP_INTER_REQUEST_DELAY_MS", "0")?;
    let cache_path = PathBuf::from(or_default(
        "BOPSMAP_CACHE_PATH",
        "./.bopsmap/applications.json",
    ));

    Ok(AppConfig {
        log_level,
        api_base_url,
        page_size,
        postcode_api_url,
        request_timeout_secs,
        user_agent,
        inter_request_delay_ms,
        cache_path,
    })
}

/// Validates an http(s) base URL and normalises it to end with exactly one `/`.
fn parse_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("'{raw}' is not an http(s) URL"),
        });
    }
    Ok(format!("{trimmed}/"))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
