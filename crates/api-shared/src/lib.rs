//! # API Shared
//!
//! Shared definitions for AutoFixer's APIs.
//!
//! Contains:
//! - The wire model (`model` module): projects, files, templates
//! - Request and response envelopes (`envelope` module)
//! - Shared services like `HealthService`
//!
//! Used by `autofixer-core` (as its return types), `api-rest` and the CLI.

pub mod envelope;
pub mod health;
pub mod model;

pub use envelope::*;
pub use health::HealthService;
pub use model::*;
