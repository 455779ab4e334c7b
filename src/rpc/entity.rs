//! The entity abstraction shared by the RPC and HTTP layers.
//!
//! Every backend service exposes the same five unary methods over its own
//! message family. [`Entity`] names that family once per entity so stubs,
//! handlers and docs are written generically.

use async_trait::async_trait;
use prost::Message;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tonic::Status;
use utoipa::ToSchema;

use crate::rpc::client::GrpcClient;
use crate::validation::Contact;

/// Bounds shared by every wire message.
pub trait WireMessage: Message + Default + Clone + 'static {}

impl<T: Message + Default + Clone + 'static> WireMessage for T {}

/// Update messages receive the identifier from the URL path.
pub trait AssignId {
    fn assign_id(&mut self, id: String);
}

/// A backend entity and its message family.
///
/// Implemented by the full record type returned by the backend.
pub trait Entity: WireMessage + Serialize + ToSchema {
    /// Fully-qualified gRPC service name, e.g. `user_service.CustomerService`.
    const SERVICE: &'static str;

    /// Singular human-readable name used in logs and error descriptions.
    const NAME: &'static str;

    type Create: WireMessage + DeserializeOwned + ToSchema + Contact;
    type Update: WireMessage + DeserializeOwned + ToSchema + Contact + AssignId;
    type PrimaryKey: WireMessage;
    type ListRequest: WireMessage;
    type ListResponse: WireMessage + Serialize + ToSchema;
    type Empty: WireMessage + Serialize + ToSchema;

    fn primary_key(id: String) -> Self::PrimaryKey;

    fn list_request(search: String, page: u64, limit: u64) -> Self::ListRequest;

    /// The typed stub for this entity's service.
    fn service(client: &GrpcClient) -> &dyn EntityService<Self>;
}

/// Client side of one backend entity service.
#[async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    async fn create(&self, request: E::Create) -> Result<E, Status>;

    async fn get_by_id(&self, request: E::PrimaryKey) -> Result<E, Status>;

    async fn get_list(&self, request: E::ListRequest) -> Result<E::ListResponse, Status>;

    async fn update(&self, request: E::Update) -> Result<E, Status>;

    async fn delete(&self, request: E::PrimaryKey) -> Result<E::Empty, Status>;
}

/// Service stand-in used when no backend channel could be built.
/// Every call fails with `Unavailable`.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn status<E: Entity>(&self) -> Status {
        Status::unavailable(format!("{} is unavailable: {}", E::SERVICE, self.reason))
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for Unavailable {
    async fn create(&self, _request: E::Create) -> Result<E, Status> {
        Err(self.status::<E>())
    }

    async fn get_by_id(&self, _request: E::PrimaryKey) -> Result<E, Status> {
        Err(self.status::<E>())
    }

    async fn get_list(&self, _request: E::ListRequest) -> Result<E::ListResponse, Status> {
        Err(self.status::<E>())
    }

    async fn update(&self, _request: E::Update) -> Result<E, Status> {
        Err(self.status::<E>())
    }

    async fn delete(&self, _request: E::PrimaryKey) -> Result<E::Empty, Status> {
        Err(self.status::<E>())
    }
}
