//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with every entity route
//! - Wire up middleware (panic recovery, request id, tracing, CORS, limits)
//! - Serve static images and API documentation
//! - Run until a signal or an explicit shutdown arrives
//!
//! # Design Decisions
//! - Configuration and the RPC client are built once in `main` and injected
//!   through [`AppState`]
//! - The API key check is a `route_layer` on entity routes only, so `/`,
//!   `/swagger` and `/images` stay public

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::docs;
use crate::http::error::handle_panic;
use crate::http::handlers;
use crate::http::middleware::require_api_key;
use crate::http::routes;
use crate::lifecycle::wait_for_signal;
use crate::rpc::GrpcClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<GrpcClient>,
    pub config: Arc<GatewayConfig>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl GatewayServer {
    pub fn new(config: Arc<GatewayConfig>, client: Arc<GrpcClient>) -> Self {
        let state = AppState {
            client,
            config: config.clone(),
        };
        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let config = state.config.clone();

        let api = routes::api_router().route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

        let mut router: Router<AppState> = Router::new()
            .route("/", get(handlers::root))
            .merge(api)
            .nest_service("/images", ServeDir::new(&config.http.static_dir));

        if config.http.docs_enabled {
            router = router.merge(docs::router::<AppState>(docs::build_openapi(&config)));
        }

        let trace = TraceLayer::new_for_http().make_span_with(
            |req: &axum::http::Request<axum::body::Body>| {
                let request_id = req
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %request_id,
                )
            },
        );

        // Outermost first.
        router.with_state(state).layer(
            ServiceBuilder::new()
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(trace)
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(config.http.body_limit_bytes)),
        )
    }

    /// The fully layered router, for in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Serve until SIGINT/SIGTERM or a message on `shutdown`, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service = %self.config.service_name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = wait_for_signal() => {}
                    _ = shutdown.recv() => tracing::info!("shutdown requested"),
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
