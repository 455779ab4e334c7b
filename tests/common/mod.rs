//! Shared utilities for integration tests.
//!
//! [`MockBackend`] stands in for one user-service entity. It records every
//! request it receives and answers from a configurable responder, so tests
//! can assert both what the gateway forwarded and what it returned.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tonic::{Code, Status};
use tower::ServiceExt;

use api_gateway::config::GatewayConfig;
use api_gateway::rpc::proto::{Branch, Customer, Seller, Shop, SystemUser};
use api_gateway::rpc::{Entity, EntityService};
use api_gateway::{GatewayServer, GrpcClient, Shutdown};

type Responder<Req, Resp> = Box<dyn Fn(&Req) -> Resp + Send + Sync>;

/// In-memory recording backend for one entity.
pub struct MockBackend<E: Entity> {
    pub creates: Mutex<Vec<E::Create>>,
    pub lists: Mutex<Vec<E::ListRequest>>,
    pub gets: Mutex<Vec<E::PrimaryKey>>,
    pub updates: Mutex<Vec<E::Update>>,
    pub deletes: Mutex<Vec<E::PrimaryKey>>,
    on_create: Option<Responder<E::Create, E>>,
    on_update: Option<Responder<E::Update, E>>,
    failure: Mutex<Option<(Code, String)>>,
    panics: AtomicBool,
    latency: Option<Duration>,
}

impl<E: Entity> Default for MockBackend<E> {
    fn default() -> Self {
        Self {
            creates: Mutex::default(),
            lists: Mutex::default(),
            gets: Mutex::default(),
            updates: Mutex::default(),
            deletes: Mutex::default(),
            on_create: None,
            on_update: None,
            failure: Mutex::new(None),
            panics: AtomicBool::new(false),
            latency: None,
        }
    }
}

impl<E: Entity> MockBackend<E> {
    pub fn with_create(mut self, f: impl Fn(&E::Create) -> E + Send + Sync + 'static) -> Self {
        self.on_create = Some(Box::new(f));
        self
    }

    pub fn with_update(mut self, f: impl Fn(&E::Update) -> E + Send + Sync + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Every following call fails with `code`.
    pub fn fail_with(&self, code: Code, message: &str) {
        *self.failure.lock().unwrap() = Some((code, message.to_string()));
    }

    pub fn set_panics(&self, panics: bool) {
        self.panics.store(panics, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.creates.lock().unwrap().len()
            + self.lists.lock().unwrap().len()
            + self.gets.lock().unwrap().len()
            + self.updates.lock().unwrap().len()
            + self.deletes.lock().unwrap().len()
    }

    async fn before_reply(&self) -> Result<(), Status> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.panics.load(Ordering::SeqCst) {
            panic!("mock backend exploded");
        }
        match self.failure.lock().unwrap().clone() {
            Some((code, message)) => Err(Status::new(code, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<E: Entity> EntityService<E> for MockBackend<E> {
    async fn create(&self, request: E::Create) -> Result<E, Status> {
        self.creates.lock().unwrap().push(request.clone());
        self.before_reply().await?;
        Ok(self.on_create.as_ref().map(|f| f(&request)).unwrap_or_default())
    }

    async fn get_by_id(&self, request: E::PrimaryKey) -> Result<E, Status> {
        self.gets.lock().unwrap().push(request);
        self.before_reply().await?;
        Ok(E::default())
    }

    async fn get_list(&self, request: E::ListRequest) -> Result<E::ListResponse, Status> {
        self.lists.lock().unwrap().push(request);
        self.before_reply().await?;
        Ok(E::ListResponse::default())
    }

    async fn update(&self, request: E::Update) -> Result<E, Status> {
        self.updates.lock().unwrap().push(request.clone());
        self.before_reply().await?;
        Ok(self.on_update.as_ref().map(|f| f(&request)).unwrap_or_default())
    }

    async fn delete(&self, request: E::PrimaryKey) -> Result<E::Empty, Status> {
        self.deletes.lock().unwrap().push(request);
        self.before_reply().await?;
        Ok(E::Empty::default())
    }
}

/// One mock per backend service.
pub struct Mocks {
    pub customer: Arc<MockBackend<Customer>>,
    pub system_user: Arc<MockBackend<SystemUser>>,
    pub seller: Arc<MockBackend<Seller>>,
    pub branch: Arc<MockBackend<Branch>>,
    pub shop: Arc<MockBackend<Shop>>,
}

impl Mocks {
    /// Customers and sellers echo their create/update bodies with an id.
    pub fn new() -> Self {
        Self::with_latency(None)
    }

    pub fn with_latency(latency: Option<Duration>) -> Self {
        let customer = MockBackend::<Customer>::default()
            .with_create(|req| Customer {
                id: format!("customer-{}", req.name),
                name: req.name.clone(),
                phone: req.phone.clone(),
                email: req.email.clone(),
                address: req.address.clone(),
                ..Default::default()
            })
            .with_update(|req| Customer {
                id: req.id.clone(),
                name: req.name.clone(),
                phone: req.phone.clone(),
                email: req.email.clone(),
                address: req.address.clone(),
                ..Default::default()
            });

        let seller = MockBackend::<Seller>::default().with_create(|req| Seller {
            id: format!("seller-{}", req.name),
            name: req.name.clone(),
            phone: req.phone.clone(),
            email: req.email.clone(),
            shop_id: req.shop_id.clone(),
            ..Default::default()
        });

        let (customer, seller) = match latency {
            Some(latency) => (customer.with_latency(latency), seller.with_latency(latency)),
            None => (customer, seller),
        };

        Self {
            customer: Arc::new(customer),
            system_user: Arc::new(MockBackend::default()),
            seller: Arc::new(seller),
            branch: Arc::new(MockBackend::default()),
            shop: Arc::new(MockBackend::default()),
        }
    }

    pub fn client(&self) -> GrpcClient {
        GrpcClient::new(
            self.customer.clone(),
            self.system_user.clone(),
            self.seller.clone(),
            self.branch.clone(),
            self.shop.clone(),
        )
    }

    pub fn total_calls(&self) -> usize {
        self.customer.call_count()
            + self.system_user.call_count()
            + self.seller.call_count()
            + self.branch.call_count()
            + self.shop.call_count()
    }
}

pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.http_port = "127.0.0.1:0".to_string();
    config
}

pub fn router(config: GatewayConfig, client: GrpcClient) -> Router {
    GatewayServer::new(Arc::new(config), Arc::new(client)).router()
}

/// Drive one request through `router` in-process.
pub async fn send(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<&str>,
    headers: &[(&str, &str)],
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

/// A gateway serving on an ephemeral local port.
pub struct TestGateway {
    pub base_url: String,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<std::io::Result<()>>,
}

pub async fn spawn_gateway(config: GatewayConfig, client: GrpcClient) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(Arc::new(config), Arc::new(client));
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(server.run(listener, rx));

    TestGateway {
        base_url: format!("http://{addr}"),
        shutdown,
        handle,
    }
}

/// A local port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
