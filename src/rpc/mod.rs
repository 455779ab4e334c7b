//! RPC layer: wire messages, typed stubs and the aggregate client.
//!
//! # Data Flow
//! ```text
//! handler ──▶ Entity::service(&GrpcClient) ──▶ EntityStub<E> ──▶ Channel ──▶ user service
//! ```

pub mod client;
pub mod entity;
pub mod proto;
pub mod stub;

pub use client::{ConnectionError, GrpcClient};
pub use entity::{AssignId, Entity, EntityService, Unavailable, WireMessage};
pub use stub::EntityStub;
