//! DMS metadata server binary.
//!
//! Reads configuration from flags or the environment, wires the allocator,
//! resolver, and composer into the network module, and serves until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dms_metadata_core::SequentialIdGenerator;
use dms_metadata_server::network::{NetworkConfig, NetworkModule, DEFAULT_MAX_UPLOAD_BYTES};
use dms_metadata_server::{ConfiguredStorageUrlResolver, MetadataComposer};
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issues file identifiers and storage upload URLs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Listen port
    #[arg(long, env = "PORT", default_value = "3002")]
    port: u16,

    /// Base URL of the storage service handed to clients
    #[arg(long, env = "STORAGE_SERVICE_URL")]
    storage_service_url: Option<String>,

    /// Maximum request body accepted on GET /file, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    request_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    info!("Starting DMS metadata server");
    if args.storage_service_url.is_none() {
        warn!("STORAGE_SERVICE_URL is not set; GET /file will answer 500 until it is configured");
    }

    let resolver = ConfiguredStorageUrlResolver::new(args.storage_service_url.clone());
    let composer = MetadataComposer::new(
        Arc::new(SequentialIdGenerator::new()),
        Arc::new(resolver),
    );

    let config = NetworkConfig {
        host: args.host.clone(),
        port: args.port,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
        max_upload_bytes: args.max_upload_bytes,
    };

    let mut network = NetworkModule::new(config, Arc::new(composer));
    network.start().await?;
    network.serve(shutdown_signal()).await?;

    info!("DMS metadata server stopped");
    Ok(())
}

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
