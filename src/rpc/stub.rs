//! Generic unary stub over a tonic channel.
//!
//! # Responsibilities
//! - Build the `/<package.Service>/<Method>` path for each call
//! - Encode requests and decode responses with the prost codec
//! - Surface backend failures as `tonic::Status` untouched
//! - Enforce the per-call deadline and report it as `DeadlineExceeded`
//!
//! # Design Decisions
//! - One stub type serves every entity; the entity supplies the service
//!   name and message family.
//! - The channel is cloned per call so concurrent requests never contend
//!   on a `&mut` borrow. Cloning a `Channel` only bumps a handle.
//! - The deadline travels to the backend as `grpc-timeout` and is also
//!   enforced locally. tonic reports its own expired timers as `Cancelled`,
//!   which would otherwise read as a client disconnect.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{Code, GrpcMethod, Request, Status};
use tonic_prost::ProstCodec;

use crate::rpc::entity::{Entity, EntityService, WireMessage};

pub const METHOD_CREATE: &str = "Create";
pub const METHOD_GET_BY_ID: &str = "GetByID";
pub const METHOD_GET_LIST: &str = "GetList";
pub const METHOD_UPDATE: &str = "Update";
pub const METHOD_DELETE: &str = "Delete";

/// Message tonic attaches to `Cancelled` when a client-side timer fires.
const TIMEOUT_EXPIRED: &str = "Timeout expired";

/// Builds the HTTP/2 path of a unary method.
pub fn method_path(service: &str, method: &str) -> String {
    format!("/{service}/{method}")
}

/// Typed stub for one entity service.
pub struct EntityStub<E> {
    inner: Grpc<Channel>,
    deadline: Duration,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityStub<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            deadline: self.deadline,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> EntityStub<E> {
    pub fn new(channel: Channel, deadline: Duration) -> Self {
        Self {
            inner: Grpc::new(channel),
            deadline,
            _entity: PhantomData,
        }
    }

    async fn unary<Req, Resp>(&self, method: &'static str, message: Req) -> Result<Resp, Status>
    where
        Req: WireMessage,
        Resp: WireMessage,
    {
        let path = PathAndQuery::try_from(method_path(E::SERVICE, method))
            .map_err(|e| Status::internal(format!("invalid method path: {e}")))?;

        let mut request = Request::new(message);
        request.set_timeout(self.deadline);
        request
            .extensions_mut()
            .insert(GrpcMethod::new(E::SERVICE, method));

        let mut grpc = self.inner.clone();
        let call = async move {
            grpc.ready()
                .await
                .map_err(|e| Status::unknown(format!("service was not ready: {e}")))?;
            let codec = ProstCodec::<Req, Resp>::default();
            grpc.unary(request, path, codec).await
        };

        match tokio::time::timeout(self.deadline, call).await {
            Ok(Ok(response)) => Ok(response.into_inner()),
            Ok(Err(status)) => Err(deadline_aware(status, self.deadline)),
            Err(_) => Err(deadline_exceeded(self.deadline)),
        }
    }
}

fn deadline_exceeded(deadline: Duration) -> Status {
    Status::deadline_exceeded(format!(
        "no response within {}ms",
        deadline.as_millis()
    ))
}

/// Rewrites tonic's timer-driven `Cancelled` as `DeadlineExceeded`.
fn deadline_aware(status: Status, deadline: Duration) -> Status {
    if status.code() == Code::Cancelled && status.message() == TIMEOUT_EXPIRED {
        deadline_exceeded(deadline)
    } else {
        status
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for EntityStub<E> {
    async fn create(&self, request: E::Create) -> Result<E, Status> {
        self.unary(METHOD_CREATE, request).await
    }

    async fn get_by_id(&self, request: E::PrimaryKey) -> Result<E, Status> {
        self.unary(METHOD_GET_BY_ID, request).await
    }

    async fn get_list(&self, request: E::ListRequest) -> Result<E::ListResponse, Status> {
        self.unary(METHOD_GET_LIST, request).await
    }

    async fn update(&self, request: E::Update) -> Result<E, Status> {
        self.unary(METHOD_UPDATE, request).await
    }

    async fn delete(&self, request: E::PrimaryKey) -> Result<E::Empty, Status> {
        self.unary(METHOD_DELETE, request).await
    }
}
