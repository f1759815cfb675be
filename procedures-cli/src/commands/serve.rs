//! HTTP server command
//!
//! Resolves configuration once, builds the store, and runs the procedure
//! API until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use procedures_server::db::{create_pool_with_options, pool::DEFAULT_MAX_CONNECTIONS};
use procedures_server::http::server::DEFAULT_REQUEST_TIMEOUT_SECS;
use procedures_server::{
    run_server, InMemoryProcedureStore, ProcedureRepo, ProcedureStore, ServerConfig,
};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "PROCEDURES_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Database URL (PostgreSQL connection string)
    #[arg(long, env = "POSTGRES_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "PROCEDURES_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Request timeout in seconds
    #[arg(long, env = "PROCEDURES_REQUEST_TIMEOUT", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep procedures in memory instead of PostgreSQL (data is lost on exit).
    /// Takes precedence over --database-url.
    #[arg(long)]
    pub in_memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store: Arc<dyn ProcedureStore> = if args.in_memory {
        tracing::warn!("Using in-memory store; procedures will not be persisted");
        Arc::new(InMemoryProcedureStore::new())
    } else {
        let database_url = args
            .database_url
            .context("POSTGRES_URL not set. Set via --database-url, POSTGRES_URL env, or .env")?;

        let pool = create_pool_with_options(&database_url, args.max_connections)
            .await
            .context("Failed to create database pool")?;
        Arc::new(ProcedureRepo::new(pool))
    };

    tracing::info!("Starting procedures server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout),
    };

    // Blocks until shutdown
    run_server(store, config).await.context("Server error")?;

    Ok(())
}
