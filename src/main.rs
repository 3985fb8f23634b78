//! Casting Predictor - process parameter prediction service
//!
//! # Usage
//!
//! ```bash
//! # Serve on the default address (127.0.0.1:5000)
//! cargo run --release
//!
//! # Reproducible adjusted values
//! ./casting-predictor --seed 42 --addr 0.0.0.0:8080
//!
//! # One-off report without starting the server
//! ./casting-predictor predict --temp 30
//! ```
//!
//! # Environment Variables
//!
//! - `CASTING_CONFIG`: Path to a TOML config file
//! - `CASTING_SERVER_ADDR`: Override the bind address
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use casting_predictor::api::{create_app, PredictorState};
use casting_predictor::config::AppConfig;
use casting_predictor::predictor::{
    AdjustmentSource, CastingTemperature, ParameterPredictor,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "casting-predictor")]
#[command(about = "Casting process parameter predictor")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "127.0.0.1:5000")
    #[arg(short, long, global = true)]
    addr: Option<String>,

    /// Path to a TOML config file (takes precedence over CASTING_CONFIG)
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Seed the adjusted-value generator for reproducible output
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Run the HTTP server (default)
    Serve,

    /// Print the report for one casting temperature as JSON
    Predict {
        /// Casting temperature (number or numeric string)
        #[arg(long, allow_hyphen_values = true)]
        temp: String,
    },

    /// Print the parameter table as JSON
    Parameters,
}

// ============================================================================
// Logging
// ============================================================================

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}

// ============================================================================
// Configuration
// ============================================================================

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .apply_env_overrides(),
        None => AppConfig::load(),
    }
    .with_overrides(args.addr.clone(), args.seed);

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

// ============================================================================
// Offline Commands
// ============================================================================

/// Render the report for one temperature. `seed` is the resolved config seed.
fn predict_json(temp: &str, seed: Option<u64>) -> Result<String> {
    let casting_temp: CastingTemperature = temp
        .parse()
        .with_context(|| format!("'{temp}' is not a valid casting temperature"))?;

    let report = AdjustmentSource::from_seed(seed).compute(&ParameterPredictor::new(), casting_temp);
    Ok(serde_json::to_string_pretty(&report)?)
}

fn parameters_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(ParameterPredictor::new().table())?)
}

// ============================================================================
// Server
// ============================================================================

async fn run_server(config: AppConfig) -> Result<()> {
    let source = AdjustmentSource::from_seed(config.predictor.seed);
    if let Some(seed) = config.predictor.seed {
        info!(seed, "Adjusted values: seeded generator (reproducible)");
    } else {
        info!("Adjusted values: thread-local entropy");
    }

    let app = create_app(PredictorState::new(source), &config.server);

    let listener = tokio::net::TcpListener::bind(&config.server.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.addr))?;
    info!("✓ HTTP server listening on {}", config.server.addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
        }
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await
        .context("HTTP server error")?;

    info!("✓ Casting Predictor shutdown complete");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.json_logs);

    match &args.command {
        Some(SubCommand::Predict { temp }) => {
            let config = load_config(&args)?;
            println!("{}", predict_json(temp, config.predictor.seed)?);
            return Ok(());
        }
        Some(SubCommand::Parameters) => {
            println!("{}", parameters_json()?);
            return Ok(());
        }
        Some(SubCommand::Serve) | None => {}
    }

    let config = load_config(&args)?;

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Casting Predictor v{}", env!("CARGO_PKG_VERSION"));
    info!("  Process Parameter Optimum Classification");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    run_server(config).await
}
