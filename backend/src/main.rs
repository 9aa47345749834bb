//! Backend entry-point: pool construction, optional seeding, and the
//! HTTP listener.

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, seed_demo_data};
use backend::server::{ServerConfig, build_http_state, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env();

    let pool = DbPool::new(PoolConfig::new(&config.database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool init failed: {e}")))?;

    if config.seed_on_startup {
        let report = seed_demo_data(&pool)
            .await
            .map_err(|e| std::io::Error::other(format!("startup seeding failed: {e}")))?;
        info!(
            creatures = report.creatures_inserted,
            credentials = report.credentials_inserted,
            "demo fixtures applied"
        );
    }

    let health_state = web::Data::new(HealthState::new());
    let http_state = build_http_state(&pool, &config.jwt_secret);

    info!(addr = %config.bind_addr, "starting HTTP listener");
    create_server(health_state, http_state, &config)?.await
}
