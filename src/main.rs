// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![allow(unknown_lints, renamed_and_removed_lints)]
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
use color_eyre::eyre::Result;
use listings_daemon::allocator::PropertyCodeAllocator;
use listings_daemon::config::{default_config_path, default_data_dir, listings_home, load_config};
use listings_daemon::cors::{build_cors_layer, DEFAULT_CORS_ORIGINS};
use listings_daemon::grpc_logging::GrpcLoggingLayer;
use listings_daemon::lead::{LeadStore, LoggingNotifier};
use listings_daemon::listing::ListingStore;
use listings_daemon::logging::{self, init_logging, parse_rotation, LogConfig, LOG_FILENAME};
use listings_daemon::sequence::{RedbSequenceStore, SequenceStore};
use listings_daemon::server::proto::listings_daemon_server::ListingsDaemonServer;
use listings_daemon::server::{ListingsDaemonService, ShutdownSignal, FILE_DESCRIPTOR_SET};
use listings_daemon::storage::Storage;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tonic::transport::Server;
use tracing::info;

const DEFAULT_ADDR: &str = "127.0.0.1:50061";

/// Listings daemon - property code allocation and listing storage over gRPC
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, env = "LISTINGS_DAEMON_ADDR", default_value = DEFAULT_ADDR)]
    addr: String,

    /// Comma-separated list of allowed CORS origins.
    /// Use "*" to allow all origins (not recommended for production).
    #[arg(
        long,
        env = "LISTINGS_CORS_ORIGINS",
        default_value = DEFAULT_CORS_ORIGINS,
        value_delimiter = ','
    )]
    cors_origins: Vec<String>,

    /// Enable JSON log format (for production/log aggregation)
    #[arg(long, env = "LISTINGS_LOG_JSON", default_value = "false")]
    log_json: bool,

    /// Log rotation period: daily, hourly, minutely, or never
    #[arg(long, env = "LISTINGS_LOG_ROTATION", default_value = "daily")]
    log_rotation: String,

    /// Custom log directory (default: ~/.listings/logs)
    #[arg(long, env = "LISTINGS_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Directory holding the database (default: ~/.listings/data)
    #[arg(long, env = "LISTINGS_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (default: ~/.listings/config.toml)
    #[arg(long, env = "LISTINGS_CONFIG")]
    config: Option<PathBuf>,

    /// Keep all data in memory; nothing survives a restart
    #[arg(long, env = "LISTINGS_EPHEMERAL", default_value = "false")]
    ephemeral: bool,
}

fn report_server_error(
    addr: std::net::SocketAddr,
    log_file: &std::path::Path,
    e: &tonic::transport::Error,
) {
    let err_string = format!("{e:?}");
    if err_string.contains("AddrInUse") {
        eprintln!();
        eprintln!("Error: Failed to start server - address {addr} is already in use");
        eprintln!();
        eprintln!("Another instance of listings-daemon may already be running.");
        eprintln!();
        eprintln!("Options:");
        eprintln!("  1. Stop the existing process:   pkill listings-daemon");
        eprintln!("  2. Use a different port:        listings-daemon --addr 127.0.0.1:50062");
        eprintln!("  3. Check what's using the port: lsof -i :{}", addr.port());
    } else {
        eprintln!();
        eprintln!("Error: Failed to start server: {e}");
    }
    eprintln!();
    eprintln!("Logs: {}", log_file.display());
    eprintln!();
}

#[allow(unknown_lints, max_lines_per_function)]
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    let log_dir = args
        .log_dir
        .unwrap_or_else(|| listings_home().join("logs"));
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
        eprintln!("Logs: {}", log_file.display());
        eprintln!();
        return Err(e);
    }

    // A broken config is fatal: code tables must not silently fall back.
    let config_path = args.config.unwrap_or_else(default_config_path);
    let config = load_config(&config_path)?;
    let timeout = config.store_timeout()?;
    let tables = Arc::new(config.code_tables()?);

    let storage = if args.ephemeral {
        info!("Running ephemeral: data lives in memory only");
        Storage::in_memory(timeout)?
    } else {
        let data_dir = args.data_dir.unwrap_or_else(default_data_dir);
        Storage::open(&config.database_path(&data_dir), timeout)?
    };

    let sequences: Arc<dyn SequenceStore> = Arc::new(RedbSequenceStore::new(storage.clone()));
    let allocator = PropertyCodeAllocator::new(tables, sequences);
    let listings = ListingStore::new(storage.clone());
    let leads = LeadStore::new(storage.clone(), Arc::new(LoggingNotifier));

    let addr = args.addr.parse()?;

    let cors_origins: Vec<String> = args
        .cors_origins
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    info!("CORS origins: {}", cors_origins.join(", "));
    let cors = build_cors_layer(cors_origins);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(ShutdownSignal::None);
    let shutdown_tx = Arc::new(shutdown_tx);

    let service = ListingsDaemonService::new(
        allocator,
        listings,
        leads,
        shutdown_tx,
        storage.path().map(std::path::Path::to_path_buf),
    );

    let reflection_service = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    info!("Starting listings daemon on {} (gRPC + gRPC-Web)", addr);

    let server_result = Server::builder()
        .accept_http1(true) // Required for gRPC-Web
        .layer(cors)
        .layer(GrpcLoggingLayer)
        .layer(tonic_web::GrpcWebLayer::new())
        .add_service(reflection_service)
        .add_service(ListingsDaemonServer::new(service))
        .serve_with_shutdown(addr, async move {
            loop {
                if shutdown_rx.changed().await.is_err() {
                    break;
                }
                if *shutdown_rx.borrow() == ShutdownSignal::Shutdown {
                    info!("Received shutdown signal, stopping server...");
                    break;
                }
            }
        })
        .await;

    if let Err(e) = server_result {
        report_server_error(addr, &log_file, &e);
        return Err(e.into());
    }

    info!("Listings daemon stopped");
    Ok(())
}
