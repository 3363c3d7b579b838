use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use autofixer_core::CoreConfig;
use autofixer_core::config::{projects_dir_from_env_value, rest_addr_from_env_value};

/// Main entry point for the AutoFixer IDE backend
///
/// Loads `.env`, makes sure the project root exists, then serves the REST API.
///
/// # Environment Variables
/// - `AUTOFIXER_REST_ADDR`: REST server address (default: "0.0.0.0:5000")
/// - `PROJECTS_DIR`: Project root directory (default: "projects")
/// - `RUST_LOG`: Additional log filter directives
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If start-up or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("autofixer_run=info".parse()?)
                .add_directive("autofixer_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = rest_addr_from_env_value(std::env::var("AUTOFIXER_REST_ADDR").ok());
    let projects_dir = projects_dir_from_env_value(std::env::var("PROJECTS_DIR").ok());

    let cfg = Arc::new(CoreConfig::new(projects_dir)?);
    cfg.ensure_projects_dir()?;

    tracing::info!("++ Starting AutoFixer REST on {}", rest_addr);
    tracing::info!("++ Projects directory: {}", cfg.projects_dir().display());

    api_rest::serve(&rest_addr, AppState::new(cfg)).await
}
