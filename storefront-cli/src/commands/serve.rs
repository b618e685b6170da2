//! HTTP server command
//!
//! Builds the server configuration from flags and environment, creates the
//! database pool, and runs the server until shutdown.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use storefront_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use storefront_server::http::server::{DEFAULT_CORS_ORIGIN, DEFAULT_PORT};
use storefront_server::{create_pool_with_options, run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Interface to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Database URL
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// The single origin allowed by CORS
    #[arg(long, env = "CORS_ORIGIN", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// Maximum connections in the database pool
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl ServeArgs {
    /// Server configuration derived from these arguments
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_origin: self.cors_origin.clone(),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args
        .database_url
        .clone()
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let config = args.server_config();
    tracing::info!("Starting storefront server on {}", config.bind_addr);

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    // Blocks until shutdown; the pool is closed on the way out
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
