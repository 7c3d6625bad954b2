use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("PADDOCK_ENV", "development"));
    let log_level = or_default("PADDOCK_LOG_LEVEL", "info");
    let sites_path = PathBuf::from(or_default("PADDOCK_SITES_PATH", "./config/sites.yaml"));

    let classifier_base_url = or_default("PADDOCK_CLASSIFIER_BASE_URL", "https://api.openai.com");
    let classifier_api_key = lookup("PADDOCK_CLASSIFIER_API_KEY").ok();
    let classifier_model = or_default("PADDOCK_CLASSIFIER_MODEL", "gpt-4o-mini");
    let classifier_timeout_secs = parse_u64("PADDOCK_CLASSIFIER_TIMEOUT_SECS", "30")?;
    let classifier_max_retries = parse_u32("PADDOCK_CLASSIFIER_MAX_RETRIES", "3")?;
    let classifier_backoff_base_ms = parse_u64("PADDOCK_CLASSIFIER_BACKOFF_BASE_MS", "1000")?;

    Ok(AppConfig {
        env,
        log_level,
        sites_path,
        classifier_base_url,
        classifier_api_key,
        classifier_model,
        classifier_timeout_secs,
        classifier_max_retries,
        classifier_backoff_base_ms,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
