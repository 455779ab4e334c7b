//! Gateway-specific middleware. Generic layers (tracing, CORS, limits)
//! come from `tower_http` and are wired in `server.rs`.

pub mod api_key;

pub use api_key::require_api_key;
