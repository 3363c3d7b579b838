//! Constants used throughout the AutoFixer core crate.

/// Default directory for project storage when no explicit directory is configured.
pub const DEFAULT_PROJECTS_DIR: &str = "projects";

/// Default listen address for the REST gateway.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:5000";

/// File type recorded for files whose name has no extension.
pub const DEFAULT_FILE_TYPE: &str = "txt";

/// Maximum attempts when allocating a fresh project directory.
pub const MAX_PROJECT_ALLOCATION_ATTEMPTS: usize = 5;
