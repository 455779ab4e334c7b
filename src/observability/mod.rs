//! Observability.
//!
//! # Data Flow
//! ```text
//! handlers, rpc client, lifecycle
//!     → tracing events (entity, operation, code)
//!     → logging.rs subscriber (pretty or JSON) → stdout
//!
//! tower_http TraceLayer
//!     → one span per request carrying the request id
//! ```
//!
//! # Design Decisions
//! - JSON lines in release for machine parsing
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
