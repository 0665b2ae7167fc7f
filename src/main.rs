// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use inventory_daemon::app::{report_server_error, Args, StorageSettings};
use inventory_daemon::cors::{build_cors_layer, normalize_origins};
use inventory_daemon::http_logging::HttpLoggingLayer;
use inventory_daemon::logging::{self, init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use inventory_daemon::utils::default_log_dir;
use inventory_daemon::{build_router, load_config, AppState, FileSequenceStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {e}");
        return;
    }
    info!("Received shutdown signal, stopping server...");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    // Parse CLI arguments first (before logging, so we can use log config)
    let args = Args::parse();

    let log_dir = args.log_dir.clone().unwrap_or_else(default_log_dir);
    let log_file = log_dir.join(LOG_FILENAME);
    logging::set_log_file_path(log_file.to_string_lossy().to_string());

    let log_config = LogConfig {
        log_dir,
        json_format: args.log_json,
        rotation: parse_rotation(&args.log_rotation),
        ..Default::default()
    };

    if let Err(e) = init_logging(log_config) {
        eprintln!();
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!();
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    let config = load_config(args.config.as_deref()).wrap_err("Failed to load config")?;
    let storage = StorageSettings::resolve(&args, &config);
    info!(
        data_dir = %storage.data_dir.display(),
        sequence_timeout_ms = %storage.sequence_timeout.as_millis(),
        "Opening document store"
    );

    let sequences = FileSequenceStore::open(storage.counters_dir())
        .await
        .wrap_err("Failed to open sequence store")?
        .with_timeout(storage.sequence_timeout);
    let state = AppState::open(&storage.data_dir, Arc::new(sequences))
        .await
        .wrap_err("Failed to open document store")?;

    let addr: SocketAddr = args.addr.parse()?;

    let cors_origins = normalize_origins(&args.cors_origins);
    info!("CORS origins: {}", cors_origins.join(", "));

    let app = build_router(state)
        .layer(HttpLoggingLayer)
        .layer(build_cors_layer(cors_origins));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            report_server_error(addr, &e);
            return Err(e.into());
        }
    };

    info!("Starting inventory daemon on http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        report_server_error(addr, &e);
        return Err(e.into());
    }

    info!("Inventory daemon stopped");
    Ok(())
}
