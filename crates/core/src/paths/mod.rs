//! On-disk path definitions for AutoFixer projects.
//!
//! This module defines fixed relative paths inside a project directory.
//! It contains **no I/O logic** - only names. Resolution against the projects root lives in
//! [`crate::resolver`].

pub mod common;
pub mod templates;
