use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use shelterseek::ShelterSeekConfig;
use shelterseek::geo::{LocationResolver, ZipDatabase, ZipGeoLookup};
use shelterseek::store::DirectoryStore;
use shelterseek::web::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ShelterSeekConfig::load()?;
    init_tracing(&config);

    let db = match &config.dataset.path {
        Some(path) => ZipDatabase::from_path(Path::new(path))?,
        None => ZipDatabase::bundled().with_context(|| "Failed to load bundled ZIP dataset")?,
    };
    tracing::info!("ZIP reference dataset ready ({} records)", db.len());

    let resolver = LocationResolver::new(ZipGeoLookup::new(Arc::new(db)));
    let store = Arc::new(DirectoryStore::new(resolver));

    let port = config.server.port;
    let state = AppState {
        config: Arc::new(config),
        store,
    };
    web::run(state, port).await
}

fn init_tracing(config: &ShelterSeekConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
