//! EDR API Server
//!
//! OGC API - Environmental Data Retrieval server for regional pressure data.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use edr_api::build_router;
use edr_api::state::AppState;

/// EDR API Server
#[derive(Parser, Debug)]
#[command(name = "edr-api")]
#[command(about = "OGC API - Environmental Data Retrieval server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8083", env = "EDR_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "EDR_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Directory holding collection definitions (*.yaml)
    #[arg(long, default_value = "config/edr", env = "EDR_CONFIG_DIR")]
    config_dir: PathBuf,

    /// Public base URL used in links
    #[arg(long, default_value = "http://localhost:8083/edr", env = "EDR_BASE_URL")]
    base_url: String,
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = match runtime_builder.build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_server(args)) {
        error!("EDR API server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    info!("Starting EDR API server");

    let prometheus = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    // Initialize application state
    let state = AppState::from_config_dir(&args.config_dir, args.base_url.as_str())
        .context("Failed to initialize application state")?
        .with_prometheus(prometheus);

    let app = build_router(Arc::new(state));

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", args.listen))?;

    info!("EDR API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
