use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{build_router, ApiConfig, AppState};

/// Main entry point for the prescreening service
///
/// Starts the REST API server backed by the rule-based triage engine and
/// the filesystem report store. Interactive use goes through the
/// `prescreen` CLI instead.
///
/// # Environment Variables
/// - `PRESCREEN_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `PRESCREEN_DATA_DIR`: Directory for report storage (default: "medical_reports")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("prescreen_run=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = ApiConfig::from_env();
    let rest_addr = cfg.rest_addr.clone();

    tracing::info!("++ Starting prescreening REST on {}", rest_addr);
    tracing::info!("++ Storing reports under {}", cfg.storage_dir.display());

    let state = AppState::new(cfg)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
