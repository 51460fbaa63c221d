use std::sync::Arc;

use solar_analytics_api::config::StorageBackend;
use solar_analytics_api::repositories::{PanelRepository, ReadingRepository};
use solar_analytics_api::{create_router, db, AppState, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("Starting solar-analytics-api");

    let cfg_path = std::env::var("APP_CONFIG").unwrap_or_else(|_| "config/config.yaml".into());
    let cfg = Config::load(&cfg_path)?;
    info!("Configuration loaded");

    let state = match (cfg.storage.backend, &cfg.database) {
        (StorageBackend::Memory, _) => {
            info!("Using in-memory storage");
            AppState::in_memory()
        }
        (StorageBackend::Postgres, Some(db_cfg)) => {
            let pool = db::connect(db_cfg).await?;
            db::ensure_schema(&pool).await?;
            info!("Connected to database");

            AppState::new(
                Arc::new(PanelRepository::new(pool.clone())),
                Arc::new(ReadingRepository::new(pool)),
            )
        }
        (StorageBackend::Postgres, None) => {
            anyhow::bail!("postgres storage selected but no database configured")
        }
    };

    let router = create_router(state);
    let addr = format!("{}:{}", cfg.api.host, cfg.api.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", addr, e))?;

    info!("API server listening on {}", addr);

    let serve = axum::serve(listener, router);
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
        }
        info!("Shutdown signal received");
    };

    if let Err(e) = serve.with_graceful_shutdown(shutdown).await {
        tracing::error!(error = %e, "API server error");
    }

    info!("Application shutdown complete");
    Ok(())
}
