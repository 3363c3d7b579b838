//! # AutoFixer Core
//!
//! Core storage logic for the AutoFixer IDE backend.
//!
//! This crate contains pure data operations on the projects root:
//! - Project creation from templates, listing, lookup and deletion
//! - File and folder management inside a project
//! - The per-project `project.json` descriptor, kept in step with disk
//!
//! **No API concerns**: HTTP routing, status codes and response envelopes belong in `api-rest`
//! and `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod locks;
pub mod metadata;
pub mod paths;
pub mod repositories;
pub mod resolver;

pub use config::CoreConfig;
pub use error::{ErrorKind, ProjectError, ProjectResult};
pub use metadata::MetadataStore;
pub use repositories::files::FileService;
pub use repositories::projects::{ProjectListing, ProjectService};
pub use resolver::PathResolver;
