// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

use anyhow::{bail, Context, Result};
use clap::Parser;
use handyman_search::app::{create_router, AppState, VERSION};
use handyman_search::models::backend::StoreBackend;
use handyman_search::models::settings::SearchSettings;
use handyman_search::services::logging::{init_tracing, LogFormat};
use handyman_search::services::memory_store::{load_seed_file, InMemoryStore};
use handyman_search::services::postgres_store::PgStore;
use handyman_search::services::search::SearchEngine;
use handyman_search::services::store::{BookingStore, HandymanStore};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

const PG_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Parser)]
#[command(name = "handyman-search", version = VERSION, about = "Availability-aware handyman search service")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Store backend: memory or postgres
    #[arg(long, env = "STORE_BACKEND", default_value = "memory")]
    store: StoreBackend,

    /// Postgres connection string, required for the postgres backend
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// JSON file with handymen and bookings to load at start-up
    #[arg(long, env = "SEED_FILE")]
    seed: Option<PathBuf>,

    /// Log output: pretty or json
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,
}

type Stores = (Arc<dyn HandymanStore>, Arc<dyn BookingStore>);

async fn memory_stores(seed: Option<&Path>) -> Result<Stores> {
    let store = match seed {
        Some(path) => {
            let data = load_seed_file(path).await?;
            let store = InMemoryStore::from_seed(data)
                .await
                .context("Seed file contains an invalid record")?;
            let handymen = store.handyman_count().await;
            let bookings = store.booking_count().await;
            info!(path = %path.display(), handymen, bookings, "Loaded seed data");
            store
        }
        None => InMemoryStore::new(),
    };
    let store = Arc::new(store);
    let handymen: Arc<dyn HandymanStore> = store.clone();
    let bookings: Arc<dyn BookingStore> = store;
    Ok((handymen, bookings))
}

async fn postgres_stores(database_url: &str, seed: Option<&Path>) -> Result<Stores> {
    let store = PgStore::connect(database_url, PG_MAX_CONNECTIONS)
        .await
        .context("Failed to connect to Postgres")?;
    store
        .migrate()
        .await
        .context("Failed to apply database migrations")?;
    info!("Connected to Postgres");

    if let Some(path) = seed {
        let data = load_seed_file(path).await?;
        let (handymen, bookings) = (data.handymen.len(), data.bookings.len());
        for handyman in data.handymen {
            store.insert_handyman(handyman).await?;
        }
        for booking in &data.bookings {
            store.insert_booking(booking).await?;
        }
        info!(path = %path.display(), handymen, bookings, "Seeded Postgres");
    }

    let store = Arc::new(store);
    let handymen: Arc<dyn HandymanStore> = store.clone();
    let bookings: Arc<dyn BookingStore> = store;
    Ok((handymen, bookings))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format)?;

    let (handymen, bookings) = if cli.store.requires_database() {
        let Some(url) = cli.database_url.as_deref() else {
            bail!("DATABASE_URL must be set when STORE_BACKEND is {}", cli.store);
        };
        postgres_stores(url, cli.seed.as_deref()).await?
    } else {
        memory_stores(cli.seed.as_deref()).await?
    };

    let settings = SearchSettings::from_env();
    info!(
        timeout_ms = settings.timeout.as_millis() as u64,
        concurrency = settings.availability_concurrency,
        default_limit = settings.default_page_size,
        "Search settings"
    );

    let state = AppState {
        engine: Arc::new(SearchEngine::new(handymen, bookings, settings)),
        store_backend: cli.store,
    };
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .with_context(|| format!("Failed to bind {}", cli.bind))?;

    info!(version = VERSION, backend = %cli.store, "handyman-search listening on {}", cli.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
