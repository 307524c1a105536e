//! Board API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p sbbs-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.
//! `LOG_FORMAT=json` switches to structured log output.

use sbbs_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing_with_config(TracingConfig::from_env()) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Board API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        seed_demo = config.board.seed_demo,
        "Configuration loaded"
    );

    sbbs_api::run(config).await?;

    Ok(())
}
