//! Path resolution for projects and their files.
//!
//! Every client-supplied location goes through here before the filesystem is touched:
//!
//! 1. the project id is a validated single segment ([`ProjectId`]),
//! 2. the relative path is lexically confined to the project ([`RelativeProjectPath`]),
//! 3. the joined path's deepest existing ancestor is canonicalised and must still lie inside
//!    the canonicalised project directory, which catches symlinks pointing elsewhere.

use crate::paths::common::DescriptorFile;
use crate::{ProjectError, ProjectResult};
use autofixer_ids::ProjectId;
use autofixer_types::RelativeProjectPath;
use std::path::{Path, PathBuf};

/// Maps project identifiers and project-relative paths to absolute storage paths.
#[derive(Clone, Debug)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<id>`. Pure path join, no I/O.
    pub fn project_dir(&self, project_id: &ProjectId) -> PathBuf {
        project_id.project_dir(&self.root)
    }

    /// `<root>/<id>/project.json`.
    pub fn descriptor_path(&self, project_id: &ProjectId) -> PathBuf {
        self.project_dir(project_id).join(DescriptorFile::NAME)
    }

    /// Resolves a project-relative path to an absolute path inside the project directory.
    ///
    /// # Errors
    ///
    /// - `ProjectError::ReservedPath` if the path addresses the project descriptor
    /// - `ProjectError::PathTraversal` if a symlink takes the path outside the project
    /// - `ProjectError::PathResolution` if canonicalisation fails for an existing path
    pub fn file_path(
        &self,
        project_id: &ProjectId,
        relative_path: &RelativeProjectPath,
    ) -> ProjectResult<PathBuf> {
        if DescriptorFile::is_reserved(relative_path.as_str()) {
            return Err(ProjectError::ReservedPath(relative_path.to_string()));
        }

        let project_dir = self.project_dir(project_id);
        let candidate = relative_path.join_onto(&project_dir);

        // Nothing to canonicalise yet; callers report the missing project.
        if !project_dir.exists() {
            return Ok(candidate);
        }

        ensure_within(&project_dir, &candidate)?;
        Ok(candidate)
    }
}

/// Checks that `candidate` (which may not exist yet) stays inside `base` once symlinks in its
/// existing ancestors are resolved.
fn ensure_within(base: &Path, candidate: &Path) -> ProjectResult<()> {
    let canonical_base = base.canonicalize().map_err(ProjectError::PathResolution)?;

    let existing = candidate
        .ancestors()
        .find(|p| p.symlink_metadata().is_ok())
        .unwrap_or(base);

    // A dangling symlink cannot be proven to stay inside the project.
    let canonical = match existing.canonicalize() {
        Ok(p) => p,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ProjectError::PathTraversal(candidate.display().to_string()))
        }
        Err(e) => return Err(ProjectError::PathResolution(e)),
    };

    if canonical.starts_with(&canonical_base) {
        Ok(())
    } else {
        Err(ProjectError::PathTraversal(candidate.display().to_string()))
    }
}
