//! HTTP surface of the gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (middleware stack, static files, docs)
//!     → middleware/api_key.rs (entity routes only, when a key is configured)
//!     → routes.rs (fixed path table per entity)
//!     → handlers.rs (parse, validate, one RPC)
//!     → error.rs (JSON error body, gRPC code → HTTP status)
//! ```

pub mod docs;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{AppState, GatewayServer};
