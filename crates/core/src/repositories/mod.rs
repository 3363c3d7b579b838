//! Project repository services.
//!
//! [`projects::ProjectService`] handles whole projects; [`files::FileService`] handles the files
//! and folders inside one. Both share a single [`crate::MetadataStore`].

pub mod files;
pub mod projects;
pub mod shared;
