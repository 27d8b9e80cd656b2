//! # rusty-feed Binary
//!
//! The entry point that assembles the application based on settings and compile-time features.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use rf_api::middleware::{cors_policy, security_headers, standard_middleware};
use rf_api::{configure_routes, AppState};
use rf_config::{LogFormat, LogSettings, Settings, StorageBackend, StorageSettings};
use rf_core::controller::FeedController;
use rf_core::memory::InMemoryKv;
use rf_core::store::KvPostStore;
use rf_core::time::SystemClock;
use rf_core::traits::PostStore;
use tracing_subscriber::EnvFilter;

// Feature-gated imports
#[cfg(feature = "store-file")]
use rf_store_file::FileKvStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings.log)?;

    // 1. Initialize Storage Implementation
    let store = build_store(&settings.storage)?;

    // 2. Assemble the controller
    let zone = settings.display.zone()?;
    let state = web::Data::new(AppState {
        controller: FeedController::new(store, Box::new(SystemClock), zone),
    });

    let (host, port) = settings.server.bind_addr();
    tracing::info!(%host, port, backend = ?settings.storage.backend, "rusty-feed starting");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(standard_middleware())
            .wrap(security_headers())
            .wrap(cors_policy())
            .configure(configure_routes)
    })
    .bind((host, port))
    .with_context(|| format!("binding {host}:{port}"))?
    .run()
    .await
    .context("running server")
}

fn init_tracing(log: &LogSettings) -> anyhow::Result<()> {
    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .with_context(|| format!("invalid log level {:?}", log.level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match log.format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed
        .map_err(|err| anyhow::anyhow!(err))
        .context("installing tracing subscriber")
}

fn build_store(storage: &StorageSettings) -> anyhow::Result<Box<dyn PostStore>> {
    match storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; posts are lost on restart");
            Ok(Box::new(KvPostStore::new(InMemoryKv::new())))
        }
        #[cfg(feature = "store-file")]
        StorageBackend::File => {
            let kv = FileKvStore::open(&storage.root)
                .with_context(|| format!("opening storage root {}", storage.root.display()))?;
            Ok(Box::new(KvPostStore::new(kv)))
        }
        #[cfg(not(feature = "store-file"))]
        StorageBackend::File => anyhow::bail!("file storage requested but the store-file feature is disabled"),
    }
}
