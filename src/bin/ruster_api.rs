//! Ruster Shield API Server
//!
//! REST API for wallet and domain fraud risk scoring
//!
//! Usage:
//!   cargo run --bin ruster_api
//!
//! Environment:
//!   PORT / RUSTER_PORT          - Server port (default: 8080)
//!   RUSTER_HOST                 - Server host (default: 0.0.0.0)
//!   RUSTER_API_KEYS             - Comma-separated accepted keys (default: open)
//!   RUSTER_RATE_LIMIT           - Requests per minute per client (default: 100)
//!   RUSTER_REFERENCE_DB         - Wallet reference database JSON
//!   RUSTER_DOMAIN_DB            - Domain reference database JSON
//!   RUSTER_RENORMALIZE_WEIGHTS  - Scale wallet scores to reach 1.0
//!   RUSTER_TELEMETRY_DIR        - Stats export directory (default: ./telemetry)
//!   RUST_LOG                    - Log filter (default: info)

use ruster_shield::api::{create_router, start_cleanup_task, AppState};
use ruster_shield::utils::constants::{APP_NAME, APP_VERSION};
use ruster_shield::{EngineConfig, FraudAnalyzer, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    info!("🛡️ {} API v{}", APP_NAME, APP_VERSION);

    let engine_config = EngineConfig::from_env();
    let server_config = ServerConfig::from_env()?;

    // Without reference data there is nothing to serve
    let analyzer = match FraudAnalyzer::from_config(&engine_config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            error!("❌ Cannot load reference data: {}", e);
            return Err(e.into());
        }
    };

    let state = Arc::new(AppState::new(analyzer, &server_config));
    let telemetry = state.telemetry.clone();

    let cleanup = start_cleanup_task(state.clone());
    info!("🧹 Background cleanup task started");

    let app = create_router(state);
    let addr: SocketAddr = server_config.bind_addr().parse()?;

    info!("🚀 {} API starting on http://{}", APP_NAME, addr);
    info!("Endpoints:");
    info!("  POST /v1/scan/wallet    - Wallet risk assessment");
    info!("  POST /v1/scan/domain    - Domain phishing heuristic");
    info!("  POST /v1/scan/batch     - Batch wallet scan (up to 100 addresses)");
    info!("  GET  /v1/stats          - Scan statistics");
    info!("  GET  /v1/health         - Health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("⚠️ Failed to install Ctrl+C handler: {}", e);
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 Shutdown signal received, cleaning up...");
    cleanup.abort();

    let stats = telemetry.get_stats();
    info!("   Total scans: {}", stats.total_scans);
    info!("   Threats detected: {}", stats.threats_detected);

    match telemetry.export_stats_json() {
        Ok(path) => info!("   ✅ Stats exported to: {}", path.display()),
        Err(e) => warn!("   ⚠️ Failed to export stats: {}", e),
    }
    if let Err(e) = telemetry.export_stats_csv() {
        warn!("   ⚠️ Failed to append stats history: {}", e);
    }

    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}
