//! Structured logging.
//!
//! # Responsibilities
//! - Install the global tracing subscriber once at startup
//! - Derive the default filter from the configured log level
//!
//! # Design Decisions
//! - JSON format for release, human-readable format otherwise
//! - `RUST_LOG` replaces the derived filter entirely when set

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Environment, GatewayConfig};

/// Filter used when `RUST_LOG` is unset.
pub fn default_directive(config: &GatewayConfig) -> String {
    let level = config.log_level.to_ascii_lowercase();
    format!("api_gateway={level},tower_http={level}")
}

pub fn init_logging(config: &GatewayConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));

    let registry = tracing_subscriber::registry().with(filter);
    match config.environment {
        Environment::Release => registry.with(fmt::layer().json()).try_init(),
        Environment::Debug | Environment::Test => registry.with(fmt::layer()).try_init(),
    }
}
