//! API gateway binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                   API GATEWAY                     │
//!                  │                                                   │
//!   HTTP request   │  ┌──────────┐   ┌──────────┐   ┌─────────────┐  │
//!   ───────────────┼─▶│middleware│──▶│  routes  │──▶│  handlers   │  │
//!                  │  │  stack   │   │ (fixed)  │   │ validate +  │  │
//!                  │  └──────────┘   └──────────┘   │ paginate    │  │
//!                  │                                └──────┬──────┘  │
//!                  │                                       ▼         │
//!   HTTP response  │  ┌──────────┐                  ┌─────────────┐  │   gRPC
//!   ◀──────────────┼──│ ApiError │◀─────────────────│ GrpcClient  │◀─┼──────▶ user
//!                  │  │ / JSON   │                  │ one channel │  │        service
//!                  │  └──────────┘                  └─────────────┘  │
//!                  └──────────────────────────────────────────────────┘
//! ```
//!
//! Startup order: config → logging → RPC client → router → listener.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use api_gateway::config::{load_config, GatewayConfig, DEFAULT_ENV_FILE};
use api_gateway::observability::init_logging;
use api_gateway::{GatewayServer, GrpcClient, Shutdown};

#[derive(Parser)]
#[command(name = "api-gateway")]
#[command(about = "HTTP to gRPC gateway for the user service", long_about = None)]
struct Cli {
    /// TOML file layered under the environment.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// `KEY=value` file read before the process environment. Skipped when
    /// missing.
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    env_file: PathBuf,

    /// Listen port, overriding HTTP_PORT.
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the gateway (default)
    Run,
    /// Validate the configuration, print it and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref(), Some(cli.env_file.as_path()))?;
    if let Some(port) = cli.port {
        config.http_port = format!(":{port}");
    }

    if cli.print_config || matches!(cli.command, Some(Command::Check)) {
        println!("{}", toml::to_string_pretty(&config.redacted())?);
        return Ok(());
    }

    init_logging(&config)?;
    tracing::info!(
        service = %config.service_name,
        version = %config.version,
        environment = config.environment.as_str(),
        "api-gateway starting"
    );
    if !cli.env_file.exists() {
        tracing::debug!(path = %cli.env_file.display(), "no env file found");
    }

    let client = connect_backend(&config).await;
    let config = Arc::new(config);

    let listener = TcpListener::bind(config.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config, Arc::new(client));
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// A failed dial is not fatal: requests answer 5xx until the backend is up.
async fn connect_backend(config: &GatewayConfig) -> GrpcClient {
    match GrpcClient::connect(&config.user_service).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "grpc dial error");
            GrpcClient::connect_lazy(&config.user_service).unwrap_or_else(|e| {
                tracing::error!(error = %e, "user service endpoint is unusable");
                GrpcClient::disconnected(e.to_string())
            })
        }
    }
}
