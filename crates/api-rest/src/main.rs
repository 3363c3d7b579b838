//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without loading a `.env` file.
//!
//! ## Intended use
//! Useful for development and debugging. The workspace's main `autofixer-run` binary serves the
//! same router after loading `.env`.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use autofixer_core::config::{projects_dir_from_env_value, rest_addr_from_env_value};
use autofixer_core::CoreConfig;

/// Main entry point for the AutoFixer REST API server
///
/// # Environment Variables
/// - `AUTOFIXER_REST_ADDR`: Server address (default: "0.0.0.0:5000")
/// - `PROJECTS_DIR`: Project root directory (default: "projects"), created if missing
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the projects directory cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("autofixer_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = rest_addr_from_env_value(std::env::var("AUTOFIXER_REST_ADDR").ok());
    let projects_dir = projects_dir_from_env_value(std::env::var("PROJECTS_DIR").ok());

    let cfg = Arc::new(CoreConfig::new(projects_dir)?);
    cfg.ensure_projects_dir()?;

    tracing::info!(
        "-- Starting AutoFixer REST API on {} (projects: {})",
        addr,
        cfg.projects_dir().display()
    );

    api_rest::serve(&addr, AppState::new(cfg)).await
}
