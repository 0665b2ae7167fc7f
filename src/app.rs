use crate::config::DaemonConfig;
use crate::logging::get_log_file_path;
use crate::utils::default_data_dir;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Inventory Daemon - REST backend for inventory items, suppliers and categories
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "INVENTORY_DAEMON_ADDR", default_value = DEFAULT_ADDR)]
    pub addr: String,

    /// Root directory of the document store (default: ~/.inventory/data)
    #[arg(long, env = "INVENTORY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Config file (default: ~/.inventory/config.toml)
    #[arg(long, env = "INVENTORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Comma-separated list of allowed CORS origins.
    /// Use "*" to allow all origins (not recommended for production).
    #[arg(
        long,
        env = "INVENTORY_CORS_ORIGINS",
        default_value = crate::cors::DEFAULT_CORS_ORIGINS,
        value_delimiter = ','
    )]
    pub cors_origins: Vec<String>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "INVENTORY_LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "INVENTORY_LOG_ROTATION", default_value = "daily")]
    pub log_rotation: String,

    /// Custom log directory (default: ~/.inventory/logs)
    #[arg(long, env = "INVENTORY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Upper bound on one itemId increment, in milliseconds
    #[arg(long, env = "INVENTORY_SEQUENCE_TIMEOUT_MS")]
    pub sequence_timeout_ms: Option<u64>,
}

/// Storage settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    pub data_dir: PathBuf,
    pub sequence_timeout: Duration,
}

impl StorageSettings {
    #[must_use]
    pub fn resolve(args: &Args, config: &DaemonConfig) -> Self {
        let data_dir = args
            .data_dir
            .clone()
            .or_else(|| config.storage.data_dir.clone())
            .unwrap_or_else(default_data_dir);
        let sequence_timeout = args
            .sequence_timeout_ms
            .map_or_else(|| config.sequence_timeout(), Duration::from_millis);
        Self {
            data_dir,
            sequence_timeout,
        }
    }

    /// Directory holding the sequence counters.
    #[must_use]
    pub fn counters_dir(&self) -> PathBuf {
        self.data_dir.join("counters")
    }
}

pub fn report_server_error(addr: SocketAddr, e: &std::io::Error) {
    let log_file = get_log_file_path();
    if e.kind() == std::io::ErrorKind::AddrInUse {
        eprintln!();
        eprintln!("Error: Failed to start server - address {addr} is already in use");
        eprintln!();
        eprintln!("Another instance of inventory-daemon may already be running.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  1. Kill the existing process:   pkill inventory-daemon");
        eprintln!("  2. Use a different port:        inventory-daemon --addr 127.0.0.1:3001");
        eprintln!("  3. Check what's using the port: lsof -i :{}", addr.port());
        eprintln!();
        eprintln!("Logs: {log_file}");
        eprintln!();
        return;
    }
    eprintln!();
    eprintln!("Error: Failed to start server: {e}");
    eprintln!();
    eprintln!("Logs: {log_file}");
    eprintln!();
}
