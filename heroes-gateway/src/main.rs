//! Entry point for the `heroes-gateway` HTTP server.

use std::sync::Arc;

use heroes_core::{HeroService, HeroStore, StoreError};
use heroes_gateway::{auth::AdminGuard, config::GatewayConfig, routes::create_router};
use heroes_store::{create_pool, ensure_schema, MemoryHeroStore, PgHeroStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

async fn open_store(config: &GatewayConfig) -> Result<Arc<dyn HeroStore>, StoreError> {
    let Some(db) = &config.database else {
        warn!("DATABASE_URL not set; heroes are kept in memory and lost on exit");
        return Ok(Arc::new(MemoryHeroStore::new()));
    };
    let pool = create_pool(db).await?;
    ensure_schema(&pool).await?;
    Ok(Arc::new(PgHeroStore::new(pool)))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let store = match open_store(&config).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to open hero store");
            std::process::exit(1);
        }
    };

    let guard = Arc::new(AdminGuard::new(config.admin_token.as_deref()));
    if !guard.is_configured() {
        warn!("HEROES_ADMIN_TOKEN not set; update and delete will always be refused");
    }

    let app = create_router(Arc::new(HeroService::new(store)), guard);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %config.listen_addr, "heroes-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
