use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use fuelbunk::api::{self, AppState};
use fuelbunk::config::Config;
use fuelbunk::metrics::Metrics;
use fuelbunk::store::{MemoryStore, PgStore, Storage};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering.
    // Default to INFO level, can be overridden with RUST_LOG env var.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fuelbunk=debug")),
        )
        .init();

    let config = Config::load();

    let store: Arc<dyn Storage> = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to Postgres...");
            Arc::new(PgStore::connect(url).await?)
        }
        None => Arc::new(MemoryStore::new()),
    };

    let metrics = Metrics::new()?;
    let state = web::Data::new(AppState::new(store, metrics));

    tracing::info!("Starting FuelBunk on http://{}:{}", config.bind, config.port);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(api::configure))
        .bind((config.bind.as_str(), config.port))?
        .run()
        .await?;

    Ok(())
}
