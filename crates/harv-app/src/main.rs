mod cli;
mod hosts;

use std::sync::Arc;
use std::time::Duration;

use harv_ai::{OracleClient, OracleConfig};
use harv_common::Viewport;
use harv_panel::PanelController;
use harv_store::{JsonFileStore, KeyValueStore, MemoryStore};
use tracing_subscriber::EnvFilter;

use hosts::{HeadlessDocument, StaticTabs};

// Until the host reports its first resize.
const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

fn build_store(ephemeral: bool) -> Arc<dyn KeyValueStore> {
    if ephemeral {
        return Arc::new(MemoryStore::new());
    }
    match JsonFileStore::at_default_path() {
        Ok(store) => {
            tracing::info!("Session file: {}", store.path().display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::warn!("Session file unavailable, staying in memory: {e}");
            Arc::new(MemoryStore::new())
        }
    }
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or("harv=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "harv=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("HARV v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match args.config.as_deref() {
        Some(path) => harv_config::toml_loader::load_from_path(std::path::Path::new(path)),
        None => harv_config::load_config(),
    }
    .unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        harv_config::HarvConfig::default()
    });

    let mut oracle = OracleConfig::new(&config.service.endpoint)
        .with_timeout(Duration::from_secs(config.service.timeout_secs));
    if let Ok(token) = std::env::var("HARV_ORACLE_TOKEN") {
        oracle = oracle.with_token(token);
    }
    let service = match OracleClient::new(oracle) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("Answer service init failed: {e}");
            return;
        }
    };

    let store = build_store(args.ephemeral);

    let mut panel = PanelController::new(
        config,
        service,
        store,
        HeadlessDocument::new(),
        DEFAULT_VIEWPORT,
    );
    panel.activate(&StaticTabs::new(args.url)).await;

    let handle = panel.handle();
    let loop_task = tokio::spawn(panel.run());

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Signal handler failed: {e}");
    }
    tracing::info!("Shutting down");
    handle.shutdown();
    if let Err(e) = loop_task.await {
        tracing::error!("Panel loop panicked: {e}");
    }
    tracing::info!("Shutdown complete");
}
