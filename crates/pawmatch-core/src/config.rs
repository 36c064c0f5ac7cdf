use crate::app_config::{AppConfig, Environment};
use crate::model::validate_page_size;
use crate::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

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
/// Every setting has a default, so an empty environment yields a working
/// configuration pointed at the public catalog service.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("PAWMATCH_ENV", "development"))?;

    let api_base_url = or_default("PAWMATCH_API_BASE_URL", DEFAULT_API_BASE_URL);
    check_http_url(&api_base_url).map_err(|reason| invalid("PAWMATCH_API_BASE_URL", reason))?;

    let log_level = or_default("PAWMATCH_LOG_LEVEL", "info");

    let page_size = parse_u32("PAWMATCH_PAGE_SIZE", "25")?;
    let page_size =
        validate_page_size(page_size).map_err(|e| invalid("PAWMATCH_PAGE_SIZE", e.to_string()))?;

    let request_timeout_secs = parse_u64("PAWMATCH_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "PAWMATCH_REQUEST_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }
    let user_agent = or_default("PAWMATCH_USER_AGENT", "pawmatch/0.1 (dog-catalog)");

    let grid_columns = parse_usize("PAWMATCH_GRID_COLUMNS", "4")?;
    if grid_columns == 0 {
        return Err(invalid(
            "PAWMATCH_GRID_COLUMNS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        api_base_url,
        log_level,
        page_size,
        request_timeout_secs,
        user_agent,
        grid_columns,
    })
}

/// Replaces the API origin from a command-line flag, applying the same
/// http(s) check as `PAWMATCH_API_BASE_URL`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidOverride` if `base_url` is not an http(s) URL.
/// `config` is left unchanged in that case.
pub fn override_api_base_url(
    config: &mut AppConfig,
    flag: &'static str,
    base_url: String,
) -> Result<(), ConfigError> {
    check_http_url(&base_url).map_err(|reason| ConfigError::InvalidOverride { flag, reason })?;
    config.api_base_url = base_url;
    Ok(())
}

fn check_http_url(url: &str) -> Result<(), String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(format!("expected an http(s) URL, got \"{url}\""))
    }
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PAWMATCH_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
