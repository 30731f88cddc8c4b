//! Pose Evaluation Server - Main Entry Point

use api::{init_logging, run_server, ApiConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1);
    let config = ApiConfig::load(config_path.as_deref())?;
    init_logging(&config.log_level, config.log_format)?;

    info!("=== PoseLab Server v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: {} (max sessions={}, capture={})",
        config_path.as_deref().unwrap_or(api::config::DEFAULT_CONFIG_FILE),
        config.max_sessions,
        config.realtime.capture_capacity
    );

    run_server(config).await
}
