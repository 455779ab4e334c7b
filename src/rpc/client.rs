//! Aggregate gRPC client handed to the HTTP layer.
//!
//! # Responsibilities
//! - Build one channel to the user service from [`UserServiceConfig`]
//! - Expose one typed service per entity
//! - Let tests swap any service for an in-process double
//!
//! # Design Decisions
//! - Services are stored as `Arc<dyn EntityService<_>>`, so the facade is
//!   cheap to clone and share across request tasks.
//! - The per-call deadline lives on the stubs, not the endpoint, so an
//!   expired call surfaces as `DeadlineExceeded`.
//! - Connection failures are reported, not retried. Callers choose whether
//!   to fall back to a lazy channel.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tonic::transport::{Channel, Endpoint};

use crate::config::UserServiceConfig;
use crate::rpc::entity::{EntityService, Unavailable};
use crate::rpc::proto::{Branch, Customer, Seller, Shop, SystemUser};
use crate::rpc::stub::EntityStub;

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("invalid user service endpoint {uri}: {source}")]
    InvalidEndpoint {
        uri: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("failed to dial user service at {host}:{port}: {source}")]
    Dial {
        host: String,
        port: String,
        #[source]
        source: tonic::transport::Error,
    },
}

#[derive(Clone)]
pub struct GrpcClient {
    customer: Arc<dyn EntityService<Customer>>,
    system_user: Arc<dyn EntityService<SystemUser>>,
    seller: Arc<dyn EntityService<Seller>>,
    branch: Arc<dyn EntityService<Branch>>,
    shop: Arc<dyn EntityService<Shop>>,
}

impl GrpcClient {
    pub fn new(
        customer: Arc<dyn EntityService<Customer>>,
        system_user: Arc<dyn EntityService<SystemUser>>,
        seller: Arc<dyn EntityService<Seller>>,
        branch: Arc<dyn EntityService<Branch>>,
        shop: Arc<dyn EntityService<Shop>>,
    ) -> Self {
        Self {
            customer,
            system_user,
            seller,
            branch,
            shop,
        }
    }

    /// All five services share one multiplexed channel and one per-call
    /// deadline.
    pub fn from_channel(channel: Channel, deadline: Duration) -> Self {
        Self::new(
            Arc::new(EntityStub::<Customer>::new(channel.clone(), deadline)),
            Arc::new(EntityStub::<SystemUser>::new(channel.clone(), deadline)),
            Arc::new(EntityStub::<Seller>::new(channel.clone(), deadline)),
            Arc::new(EntityStub::<Branch>::new(channel.clone(), deadline)),
            Arc::new(EntityStub::<Shop>::new(channel, deadline)),
        )
    }

    /// Dials the user service and waits for the connection.
    pub async fn connect(config: &UserServiceConfig) -> Result<Self, ConnectionError> {
        let endpoint = build_endpoint(config)?;

        tracing::debug!(uri = %config.uri(), "dialing user service");
        let channel = endpoint
            .connect()
            .await
            .map_err(|source| ConnectionError::Dial {
                host: config.host.clone(),
                port: config.port.clone(),
                source,
            })?;

        tracing::info!(
            uri = %config.uri(),
            connect_timeout_ms = config.connect_timeout_ms,
            rpc_timeout_ms = config.rpc_timeout_ms,
            "connected to user service"
        );
        Ok(Self::from_channel(channel, config.rpc_timeout()))
    }

    /// Builds the channel without dialing. The first RPC connects.
    pub fn connect_lazy(config: &UserServiceConfig) -> Result<Self, ConnectionError> {
        let endpoint = build_endpoint(config)?;
        Ok(Self::from_channel(
            endpoint.connect_lazy(),
            config.rpc_timeout(),
        ))
    }

    /// A client whose every call fails with `Unavailable`.
    pub fn disconnected(reason: impl Into<String>) -> Self {
        let unavailable = Arc::new(Unavailable::new(reason));
        Self::new(
            unavailable.clone(),
            unavailable.clone(),
            unavailable.clone(),
            unavailable.clone(),
            unavailable,
        )
    }

    pub fn customer_service(&self) -> &dyn EntityService<Customer> {
        self.customer.as_ref()
    }

    pub fn system_user_service(&self) -> &dyn EntityService<SystemUser> {
        self.system_user.as_ref()
    }

    pub fn seller_service(&self) -> &dyn EntityService<Seller> {
        self.seller.as_ref()
    }

    pub fn branch_service(&self) -> &dyn EntityService<Branch> {
        self.branch.as_ref()
    }

    pub fn shop_service(&self) -> &dyn EntityService<Shop> {
        self.shop.as_ref()
    }
}

impl std::fmt::Debug for GrpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrpcClient").finish_non_exhaustive()
    }
}

fn build_endpoint(config: &UserServiceConfig) -> Result<Endpoint, ConnectionError> {
    let uri = config.uri();
    let endpoint =
        Endpoint::from_shared(uri.clone()).map_err(|source| ConnectionError::InvalidEndpoint {
            uri,
            source,
        })?;

    Ok(endpoint
        .connect_timeout(config.connect_timeout())
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .http2_keep_alive_interval(Duration::from_secs(30))
        .keep_alive_timeout(Duration::from_secs(10))
        .keep_alive_while_idle(true))
}
