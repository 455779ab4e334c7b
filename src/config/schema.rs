//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.
//! Defaults mirror the environment defaults documented in `loader.rs`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the API gateway.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GatewayConfig {
    /// Service name reported in logs.
    pub service_name: String,

    /// Deployment tier (debug, test, release).
    pub environment: Environment,

    /// Service version string.
    pub version: String,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Listen port, either `":1234"` or a full `host:port`.
    pub http_port: String,

    /// Database settings. Carried for parity with the shared config shape;
    /// the gateway itself never opens a database connection.
    pub postgres: PostgresConfig,

    /// Backend user service (gRPC) connection settings.
    pub user_service: UserServiceConfig,

    /// HTTP surface settings.
    pub http: HttpConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service_name: "user_service".to_string(),
            environment: Environment::Debug,
            version: "1.0".to_string(),
            log_level: "debug".to_string(),
            http_port: ":1234".to_string(),
            postgres: PostgresConfig::default(),
            user_service: UserServiceConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Socket address the HTTP listener binds to.
    ///
    /// A bare `":port"` (or just `"port"`) binds all interfaces.
    pub fn bind_address(&self) -> String {
        match self.http_port.strip_prefix(':') {
            Some(port) => format!("0.0.0.0:{}", port),
            None if !self.http_port.contains(':') => format!("0.0.0.0:{}", self.http_port),
            None => self.http_port.clone(),
        }
    }

    /// Copy safe to print: secrets are masked, unset ones stay unset.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if !config.postgres.password.is_empty() {
            config.postgres.password = REDACTED.to_string();
        }
        if config.http.api_key.is_some() {
            config.http.api_key = Some(REDACTED.to_string());
        }
        config
    }
}

const REDACTED: &str = "<redacted>";

/// Deployment tier.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Debug,
    Test,
    Release,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Debug => "debug",
            Environment::Test => "test",
            Environment::Release => "release",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Environment::Debug),
            "test" => Ok(Environment::Test),
            "release" => Ok(Environment::Release),
            other => Err(format!("unknown environment {:?}", other)),
        }
    }
}

/// Postgres connection fields.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PostgresConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "new".to_string(),
            password: "1".to_string(),
            database: "user_service".to_string(),
            max_connections: 30,
        }
    }
}

/// Backend user service connection settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UserServiceConfig {
    /// Backend host name or IP.
    pub host: String,

    /// Backend port.
    pub port: String,

    /// Timeout for establishing the connection, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Deadline applied to every RPC, in milliseconds.
    pub rpc_timeout_ms: u64,
}

impl Default for UserServiceConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: "8081".to_string(),
            connect_timeout_ms: 5_000,
            rpc_timeout_ms: 30_000,
        }
    }
}

impl UserServiceConfig {
    /// URI of the backend channel.
    pub fn uri(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }
}

/// HTTP surface configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    /// Directory served under `/images`.
    pub static_dir: String,

    /// Serve the OpenAPI document and Swagger UI under `/swagger`.
    pub docs_enabled: bool,

    /// Maximum request body size in bytes.
    pub body_limit_bytes: usize,

    /// API key required in the `Authorization` header of entity routes.
    /// Authentication is disabled when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            static_dir: "./static/images".to_string(),
            docs_enabled: true,
            body_limit_bytes: 2 * 1024 * 1024, // 2MB
            api_key: None,
        }
    }
}
