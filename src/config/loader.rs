//! Configuration loading from disk and the process environment.
//!
//! Layering, lowest to highest precedence:
//! built-in defaults → optional TOML file → env file → process environment.
//!
//! The env file holds `KEY=value` lines with the variables below. It is read
//! without touching the process environment, and a missing file is skipped.
//!
//! | Variable | Default |
//! |---|---|
//! | `SERVICE_NAME` | `user_service` |
//! | `ENVIRONMENT` | `debug` |
//! | `VERSION` | `1.0` |
//! | `POSTGRES_HOST` | `localhost` |
//! | `POSTGRES_PORT` | `5432` |
//! | `POSTGRES_USER` | `new` |
//! | `POSTGRES_PASSWORD` | `1` |
//! | `POSTGRES_DATABASE` | `user_service` |
//! | `POSTGRES_MAX_CONNECTIONS` | `30` |
//! | `USER_SERVICE_HOST` | `localhost` |
//! | `USER_SERVICE_PORT` | `8081` |
//! | `USER_SERVICE_CONNECT_TIMEOUT_MS` | `5000` |
//! | `USER_SERVICE_TIMEOUT_MS` | `30000` |
//! | `LOG_LEVEL` | `debug` |
//! | `HTTP_PORT` | `:1234` |
//! | `STATIC_DIR` | `./static/images` |
//! | `DOCS_ENABLED` | `true` |
//! | `API_KEY` | unset |

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Legacy spelling of `USER_SERVICE_PORT`, still honoured as a fallback.
const LEGACY_USER_SERVICE_PORT: &str = "USER_SEVICE_PORT";

/// Env file consulted when none is given on the command line.
pub const DEFAULT_ENV_FILE: &str = "/ps_go_user_service.env";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Invalid value {value:?} for environment variable {key}")]
    InvalidEnv { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the TOML file at `path` (if any),
/// then `env_file` (if any), then the process environment. The result is
/// validated.
pub fn load_config(
    path: Option<&Path>,
    env_file: Option<&Path>,
) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_file(path)?,
        None => GatewayConfig::default(),
    };

    let file_vars = match env_file {
        Some(env_file) => read_env_file(env_file)?,
        None => HashMap::new(),
    };
    apply_env(
        &mut config,
        layered_lookup(|key| std::env::var(key).ok(), file_vars),
    )?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML file into a configuration. Missing fields take defaults.
pub fn load_file(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Read `KEY=value` pairs from an env file. A missing file yields no pairs.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };
    entries
        .map(|entry| entry.map_err(ConfigError::from))
        .collect()
}

/// Lookup where `process` wins over values read from an env file.
pub fn layered_lookup<F>(
    process: F,
    file_vars: HashMap<String, String>,
) -> impl Fn(&str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    move |key| process(key).or_else(|| file_vars.get(key).cloned())
}

/// Overlay environment variables onto `config`.
///
/// `lookup` returns the value of a variable, or `None` when it is unset.
pub fn apply_env<F>(config: &mut GatewayConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("SERVICE_NAME") {
        config.service_name = v;
    }
    if let Some(v) = lookup("ENVIRONMENT") {
        config.environment = parse("ENVIRONMENT", v)?;
    }
    if let Some(v) = lookup("VERSION") {
        config.version = v;
    }

    if let Some(v) = lookup("POSTGRES_HOST") {
        config.postgres.host = v;
    }
    if let Some(v) = lookup("POSTGRES_PORT") {
        config.postgres.port = parse("POSTGRES_PORT", v)?;
    }
    if let Some(v) = lookup("POSTGRES_USER") {
        config.postgres.user = v;
    }
    if let Some(v) = lookup("POSTGRES_PASSWORD") {
        config.postgres.password = v;
    }
    if let Some(v) = lookup("POSTGRES_DATABASE") {
        config.postgres.database = v;
    }
    if let Some(v) = lookup("POSTGRES_MAX_CONNECTIONS") {
        config.postgres.max_connections = parse("POSTGRES_MAX_CONNECTIONS", v)?;
    }

    if let Some(v) = lookup("USER_SERVICE_HOST") {
        config.user_service.host = v;
    }
    if let Some(v) = lookup("USER_SERVICE_PORT").or_else(|| lookup(LEGACY_USER_SERVICE_PORT)) {
        config.user_service.port = v;
    }
    if let Some(v) = lookup("USER_SERVICE_CONNECT_TIMEOUT_MS") {
        config.user_service.connect_timeout_ms = parse("USER_SERVICE_CONNECT_TIMEOUT_MS", v)?;
    }
    if let Some(v) = lookup("USER_SERVICE_TIMEOUT_MS") {
        config.user_service.rpc_timeout_ms = parse("USER_SERVICE_TIMEOUT_MS", v)?;
    }

    if let Some(v) = lookup("LOG_LEVEL") {
        config.log_level = v;
    }
    if let Some(v) = lookup("HTTP_PORT") {
        config.http_port = v;
    }

    if let Some(v) = lookup("STATIC_DIR") {
        config.http.static_dir = v;
    }
    if let Some(v) = lookup("DOCS_ENABLED") {
        config.http.docs_enabled = parse("DOCS_ENABLED", v)?;
    }
    if let Some(v) = lookup("API_KEY") {
        config.http.api_key = if v.is_empty() { None } else { Some(v) };
    }

    Ok(())
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}
