//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handling never reads process-wide environment variables.

use crate::constants::{DEFAULT_PROJECTS_DIR, DEFAULT_REST_ADDR};
use crate::resolver::PathResolver;
use crate::{ProjectError, ProjectResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    projects_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::InvalidInput` if `projects_dir` is empty.
    pub fn new(projects_dir: PathBuf) -> ProjectResult<Self> {
        if projects_dir.as_os_str().is_empty() {
            return Err(ProjectError::InvalidInput(
                "projects directory cannot be empty".into(),
            ));
        }

        Ok(Self { projects_dir })
    }

    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    /// Path resolver rooted at the configured projects directory.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.projects_dir.clone())
    }

    /// Creates the projects directory if it does not exist yet.
    pub fn ensure_projects_dir(&self) -> ProjectResult<()> {
        if !self.projects_dir.is_dir() {
            fs::create_dir_all(&self.projects_dir).map_err(ProjectError::ProjectsDirCreation)?;
            tracing::info!(
                "created projects directory {}",
                self.projects_dir.display()
            );
        }
        Ok(())
    }
}

/// Resolve the projects directory from an optional environment value.
///
/// `None` or a blank value falls back to [`DEFAULT_PROJECTS_DIR`].
pub fn projects_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECTS_DIR))
}

/// Resolve the REST listen address from an optional environment value.
pub fn rest_addr_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_REST_ADDR.into())
}
