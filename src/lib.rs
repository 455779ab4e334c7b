//! HTTP-to-gRPC API gateway library.
//!
//! Exposes REST CRUD endpoints for customers, sellers, branches, shops and
//! system users, and forwards each call to the user service over gRPC.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod rpc;
pub mod validation;

pub use config::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use rpc::GrpcClient;
