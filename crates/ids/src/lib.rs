//! Project identifiers and project-directory derivation.
//!
//! AutoFixer names every project after its creation time: the identifier is the Unix timestamp
//! in **milliseconds**, rendered as decimal digits (for example `1700000000000`). The identifier
//! doubles as the project's directory name under the configured projects root:
//!
//! ```text
//! projects/
//!   1700000000000/
//!     project.json
//!     src/
//! ```
//!
//! Identifiers generated here are always *canonical* (digits only). Identifiers supplied by
//! clients are only required to be a single safe path segment, so directories created by other
//! tools remain addressable while anything that could escape the projects root is rejected.

mod service;

pub use service::ProjectId;

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("Invalid project id: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
