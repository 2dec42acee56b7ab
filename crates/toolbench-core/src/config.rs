use crate::app_config::{AppConfig, Environment, OutputFormat};
use crate::ConfigError;

/// Default upper bound on pasted input: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
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
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so tests can drive this
/// with a plain `HashMap` instead of mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_usize = |var: &str, default: usize| -> Result<usize, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                }),
        }
    };

    let env = parse_environment(&or_default("TOOLBENCH_ENV", "development"));
    let log_level = or_default("TOOLBENCH_LOG_LEVEL", "info");
    let output_format = or_default("TOOLBENCH_OUTPUT_FORMAT", "text")
        .parse::<OutputFormat>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "TOOLBENCH_OUTPUT_FORMAT".to_string(),
            reason,
        })?;
    let max_input_bytes = parse_usize("TOOLBENCH_MAX_INPUT_BYTES", DEFAULT_MAX_INPUT_BYTES)?;

    Ok(AppConfig {
        env,
        log_level,
        output_format,
        max_input_bytes,
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

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
