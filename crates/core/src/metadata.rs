//! Project descriptor persistence.
//!
//! Each project directory holds a `project.json` describing the project: name, template,
//! creation time, and the tracked files and folders. The [`MetadataStore`] reads and replaces
//! that file and serialises read-modify-write cycles per project.
//!
//! Writes go to `project.json.tmp`, are fsynced, then renamed over `project.json`, so a crash
//! mid-write leaves either the old or the new descriptor on disk, never a truncated one.

use crate::config::CoreConfig;
use crate::locks::ProjectLocks;
use crate::paths::common::DescriptorFile;
use crate::resolver::PathResolver;
use crate::{ProjectError, ProjectResult};
use api_shared::Project;
use autofixer_ids::ProjectId;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use std::sync::Arc;

/// Durable index of projects, backed by one descriptor file per project directory.
#[derive(Debug)]
pub struct MetadataStore {
    cfg: Arc<CoreConfig>,
    resolver: PathResolver,
    locks: ProjectLocks,
}

impl MetadataStore {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        let resolver = cfg.resolver();
        Self {
            cfg,
            resolver,
            locks: ProjectLocks::new(),
        }
    }

    pub fn cfg(&self) -> &CoreConfig {
        &self.cfg
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    #[cfg(test)]
    pub(crate) fn locks(&self) -> &ProjectLocks {
        &self.locks
    }

    /// Loads the descriptor for `project_id`.
    ///
    /// A missing directory or descriptor is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::DescriptorRead` or `ProjectError::Deserialization` if the
    /// descriptor exists but cannot be read or parsed.
    pub fn load(&self, project_id: &ProjectId) -> ProjectResult<Option<Project>> {
        let path = self.resolver.descriptor_path(project_id);
        if !path.is_file() {
            return Ok(None);
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            // Deleted between the check and the read.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ProjectError::DescriptorRead(e)),
        };

        let project = serde_json::from_str(&contents).map_err(ProjectError::Deserialization)?;
        Ok(Some(project))
    }

    /// Replaces the descriptor for `project_id` with `project`.
    ///
    /// The project directory must already exist.
    pub fn save(&self, project_id: &ProjectId, project: &Project) -> ProjectResult<()> {
        let json = serde_json::to_string_pretty(project).map_err(ProjectError::Serialization)?;
        let project_dir = self.resolver.project_dir(project_id);
        write_atomically(&project_dir, json.as_bytes())
    }

    /// Runs `f` while holding the project's lock.
    ///
    /// Use this when a filesystem change and a descriptor change must not interleave with
    /// another request on the same project.
    pub fn locked<T>(&self, project_id: &ProjectId, f: impl FnOnce() -> T) -> T {
        self.locks.with_lock(project_id, f)
    }

    /// Loads, mutates and saves the descriptor under the project's lock.
    ///
    /// Returns `Ok(None)` without calling `f` if the project has no descriptor. If `f` fails
    /// the descriptor is left untouched.
    pub fn update<T>(
        &self,
        project_id: &ProjectId,
        f: impl FnOnce(&mut Project) -> ProjectResult<T>,
    ) -> ProjectResult<Option<T>> {
        self.locked(project_id, || {
            let Some(mut project) = self.load(project_id)? else {
                return Ok(None);
            };
            let value = f(&mut project)?;
            self.save(project_id, &project)?;
            Ok(Some(value))
        })
    }
}

fn write_atomically(project_dir: &Path, data: &[u8]) -> ProjectResult<()> {
    let temp_path = project_dir.join(DescriptorFile::TEMP_NAME);
    let target = project_dir.join(DescriptorFile::NAME);

    let mut file = fs::File::create(&temp_path).map_err(ProjectError::DescriptorWrite)?;
    file.write_all(data).map_err(ProjectError::DescriptorWrite)?;
    file.sync_all().map_err(ProjectError::DescriptorWrite)?;
    drop(file);

    fs::rename(&temp_path, &target).map_err(ProjectError::DescriptorWrite)
}
