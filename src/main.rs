use anyhow::Context;
use clap::Parser;
use ptz_servo::core::{ActuatorSink, BlobStore};
use ptz_servo::utils::logger;
use ptz_servo::{
    create_router, AppState, CliArgs, FileStore, LoggingActuator, MemoryStore, ServiceConfig,
    State,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config = match ServiceConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting ptz-servo v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Service config: {:?}", config);

    let store: Arc<dyn BlobStore> = if config.in_memory {
        tracing::warn!("In-memory mode: state will not survive a restart");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!("📁 Data directory: {}", config.data_dir.display());
        Arc::new(FileStore::new(config.data_dir.clone()))
    };
    let sink: Arc<dyn ActuatorSink> = Arc::new(LoggingActuator::new());

    let state = State::load(store, sink, config.keys.clone())
        .context("failed to restore persisted servo and preset state")?;
    tracing::info!(
        servos = state.servos().len(),
        presets = state.presets().len(),
        "State restored"
    );

    let app = create_router(AppState::new(state));
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("🚀 Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
