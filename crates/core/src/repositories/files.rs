//! File and folder operations inside a single project.
//!
//! Disk is the source of truth for file content; the descriptor keeps a cached copy of each
//! tracked file so that a project can be returned in one read. Every operation that touches both
//! runs under the project's lock.

use crate::metadata::MetadataStore;
use crate::repositories::shared::project_file;
use crate::{ProjectError, ProjectResult};
use api_shared::ProjectFile;
use autofixer_ids::ProjectId;
use autofixer_types::{NonEmptyText, RelativeProjectPath};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

/// Service for the files and folders of existing projects.
#[derive(Clone, Debug)]
pub struct FileService {
    store: Arc<MetadataStore>,
}

impl FileService {
    pub fn new(store: Arc<MetadataStore>) -> Self {
        Self { store }
    }

    /// Writes a new file and appends it to the project's file list.
    ///
    /// Missing parent directories are created. An existing file at the same path is overwritten
    /// and a second entry with that path is appended.
    ///
    /// # Errors
    ///
    /// - `ProjectError::InvalidInput` if `name` or `path` is blank, before any disk access.
    /// - `ProjectError::InvalidPath`, `PathTraversal` or `ReservedPath` if `path` is not a
    ///   location inside the project.
    /// - `ProjectError::ProjectNotFound` if the project has no descriptor.
    pub fn create_file(
        &self,
        project_id: &str,
        name: &str,
        path: &str,
        content: &str,
    ) -> ProjectResult<ProjectFile> {
        let required = || ProjectError::InvalidInput("File name and path are required".into());
        let name = NonEmptyText::new(name).map_err(|_| required())?;
        NonEmptyText::new(path).map_err(|_| required())?;

        let project_id = ProjectId::parse(project_id)?;
        let relative_path = RelativeProjectPath::parse(path)?;

        self.store
            .update(&project_id, |project| {
                let target = self.store.resolver().file_path(&project_id, &relative_path)?;
                if target.is_dir() {
                    return Err(ProjectError::InvalidInput(format!(
                        "'{}' is a folder",
                        relative_path
                    )));
                }
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent).map_err(ProjectError::FolderCreation)?;
                }
                fs::write(&target, content).map_err(ProjectError::FileWrite)?;

                let entry = project_file(name.as_str(), relative_path.as_str(), content);
                project.files.push(entry.clone());
                Ok(entry)
            })?
            .ok_or(ProjectError::ProjectNotFound)
    }

    /// Reads a file's current content from disk.
    ///
    /// # Errors
    ///
    /// - `ProjectError::ProjectNotFound` if the project directory does not exist.
    /// - `ProjectError::FileNotFound` if nothing, or a folder, is at `path`.
    pub fn read_file(&self, project_id: &str, path: &str) -> ProjectResult<String> {
        let (project_id, relative_path) = self.parse_location(project_id, path)?;
        let target = self.resolve_existing(&project_id, &relative_path)?;
        match fs::read_to_string(&target) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ProjectError::FileNotFound),
            Err(e) => Err(ProjectError::FileRead(e)),
        }
    }

    /// Overwrites an existing file and refreshes the cached content of its first matching
    /// descriptor entry.
    ///
    /// A missing descriptor or a file that is not tracked in it does not fail the call.
    pub fn update_file(&self, project_id: &str, path: &str, content: &str) -> ProjectResult<()> {
        let (project_id, relative_path) = self.parse_location(project_id, path)?;

        self.store.locked(&project_id, || {
            let target = self.resolve_existing(&project_id, &relative_path)?;
            fs::write(&target, content).map_err(ProjectError::FileWrite)?;

            let Some(mut project) = self.store.load(&project_id)? else {
                tracing::debug!("project {} has no descriptor; content written only", project_id);
                return Ok(());
            };
            match project
                .files
                .iter_mut()
                .find(|f| f.path == relative_path.as_str())
            {
                Some(entry) => {
                    entry.content = content.to_string();
                    self.store.save(&project_id, &project)
                }
                None => Ok(()),
            }
        })
    }

    /// Removes a file from disk and drops every descriptor entry with its path.
    pub fn delete_file(&self, project_id: &str, path: &str) -> ProjectResult<()> {
        let (project_id, relative_path) = self.parse_location(project_id, path)?;

        self.store.locked(&project_id, || {
            let target = self.resolve_existing(&project_id, &relative_path)?;
            match fs::remove_file(&target) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => return Err(ProjectError::FileNotFound),
                Err(e) => return Err(ProjectError::FileDelete(e)),
            }

            if let Some(mut project) = self.store.load(&project_id)? {
                let before = project.files.len();
                project.files.retain(|f| f.path != relative_path.as_str());
                if project.files.len() != before {
                    self.store.save(&project_id, &project)?;
                }
            }
            Ok(())
        })
    }

    /// Creates a folder (and its parents) and records it in the folder list once.
    ///
    /// Returns the normalised folder path.
    ///
    /// # Errors
    ///
    /// - `ProjectError::InvalidInput` if `name` is blank.
    /// - `ProjectError::ProjectNotFound` if the project has no descriptor.
    pub fn create_folder(&self, project_id: &str, name: &str) -> ProjectResult<String> {
        NonEmptyText::new(name)
            .map_err(|_| ProjectError::InvalidInput("Folder name is required".into()))?;

        let project_id = ProjectId::parse(project_id)?;
        let relative_path = RelativeProjectPath::parse(name)?;

        self.store
            .update(&project_id, |project| {
                let target = self.store.resolver().file_path(&project_id, &relative_path)?;
                fs::create_dir_all(&target).map_err(ProjectError::FolderCreation)?;

                let folder = relative_path.to_string();
                if !project.folders.contains(&folder) {
                    project.folders.push(folder.clone());
                }
                Ok(folder)
            })?
            .ok_or(ProjectError::ProjectNotFound)
    }

    fn parse_location(
        &self,
        project_id: &str,
        path: &str,
    ) -> ProjectResult<(ProjectId, RelativeProjectPath)> {
        let project_id = ProjectId::parse(project_id)?;
        let relative_path = RelativeProjectPath::parse(path)?;
        Ok((project_id, relative_path))
    }

    fn resolve_existing(
        &self,
        project_id: &ProjectId,
        relative_path: &RelativeProjectPath,
    ) -> ProjectResult<PathBuf> {
        if !self.store.resolver().project_dir(project_id).is_dir() {
            return Err(ProjectError::ProjectNotFound);
        }
        let target = self.store.resolver().file_path(project_id, relative_path)?;
        if !target.is_file() {
            return Err(ProjectError::FileNotFound);
        }
        Ok(target)
    }
}
