//! Storage Sentinel
//!
//! Service binary: parses CLI/env configuration, seeds the sample
//! inventory, and serves the advisor REST API.

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use storage_sentinel::{
    AdvisorService, ApiServer, ApiServerConfig, Settings, sample_inventory,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Storage Sentinel - Risk-Aware Storage Health and Tiering Advisor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// REST API bind address
    #[arg(long, env = "API_ADDR", default_value = "0.0.0.0:8090")]
    api_addr: String,

    /// Settings file (YAML) overriding pricing, the cloud pricing table,
    /// and the strategy catalog
    #[arg(long, env = "SETTINGS_FILE")]
    settings_file: Option<PathBuf>,

    /// Currency conversion factor applied to monetary outputs
    #[arg(long, env = "CURRENCY_FACTOR")]
    currency_factor: Option<f64>,

    /// Minimum ROI multiple for compression recommendations
    #[arg(long, env = "ROI_THRESHOLD")]
    roi_threshold: Option<f64>,

    /// Disable permissive CORS
    #[arg(long, env = "DISABLE_CORS")]
    disable_cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting Storage Sentinel");
    info!("  Version: {}", storage_sentinel::VERSION);
    info!("  REST API: {}", args.api_addr);

    // Load settings, then apply CLI overrides
    let mut settings = match &args.settings_file {
        Some(path) => Settings::from_yaml_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(factor) = args.currency_factor {
        settings.pricing.currency_factor = factor;
    }
    if let Some(threshold) = args.roi_threshold {
        settings.pricing.roi_threshold = threshold;
    }
    settings.pricing.validate().context("validating pricing settings")?;

    info!(
        currency_factor = settings.pricing.currency_factor,
        roi_threshold = settings.pricing.roi_threshold,
        strategies = settings.strategy_catalog.strategies.len(),
        "settings loaded"
    );

    // Seed the in-memory inventory
    let inventory = Arc::new(sample_inventory(Utc::now()));
    info!("sample inventory seeded");

    let service = Arc::new(AdvisorService::new(inventory, settings));

    let api_config = ApiServerConfig {
        rest_addr: args
            .api_addr
            .parse()
            .with_context(|| format!("invalid REST API address: {}", args.api_addr))?,
        cors_enabled: !args.disable_cors,
    };

    let server = Arc::new(ApiServer::new(api_config, service));

    // Flip the broadcast shutdown signal on Ctrl-C
    let signal_server = server.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            signal_server.shutdown();
        }
    });

    server.run().await?;

    info!("Advisor shutdown complete");
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env()
        .add_directive(level.into())
        .add_directive("tower=warn".parse().expect("static directive"))
        .add_directive("axum=info".parse().expect("static directive"));

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
