//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the prescreening REST API server on its own.
//!
//! ## Intended use
//! This binary is useful for development and debugging when you only want the
//! REST server (with OpenAPI/Swagger UI). The workspace's main
//! `prescreen-run` binary is the usual entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{build_router, ApiConfig, AppState};

/// Main entry point for the prescreening REST API server
///
/// Starts the REST API server on the configured address (default:
/// 0.0.0.0:3000). Provides HTTP endpoints for prescreening and report
/// archive operations with OpenAPI/Swagger documentation.
///
/// # Environment Variables
/// - `PRESCREEN_REST_ADDR`: Server address (default: "0.0.0.0:3000")
/// - `PRESCREEN_DATA_DIR`: Report storage root (default: "medical_reports")
///
/// # Returns
/// * `Ok(())` - If server starts and runs successfully
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the report store cannot be opened at the storage root,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ApiConfig::from_env();

    tracing::info!("-- Starting prescreening REST API on {}", cfg.rest_addr);
    tracing::info!("-- Report storage at {}", cfg.storage_dir.display());

    let addr = cfg.rest_addr.clone();
    let state = AppState::new(cfg)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
