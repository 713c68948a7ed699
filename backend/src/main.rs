//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use std::net::SocketAddr;

use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};
use server::ServerConfig;

/// Command-line and environment configuration.
#[derive(Debug, Parser)]
struct Cli {
    /// Socket address to bind the HTTP listener to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// PostgreSQL connection URL; omit to run against the in-memory store.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Maximum connections held by the database pool.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    db_max_connections: u32,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();

    let db_pool = match &cli.database_url {
        Some(url) => {
            let pool_config = PoolConfig::new(url.clone()).with_max_size(cli.db_max_connections);
            Some(DbPool::new(pool_config).await.map_err(std::io::Error::other)?)
        }
        None => {
            warn!("DATABASE_URL not set; catalogue items are stored in memory only");
            None
        }
    };

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(cli.bind_addr).with_db_pool(db_pool);
    let server = server::create_server(health_state, config)?;

    server.await
}
