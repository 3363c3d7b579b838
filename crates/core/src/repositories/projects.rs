//! Whole-project operations: list, create, fetch, delete and run.
//!
//! ## Storage Layout
//!
//! ```text
//! <projects_dir>/
//!   <id>/              # id = creation time in milliseconds
//!     project.json     # descriptor
//!     src/
//!     ...              # template and user files
//! ```
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. HTTP concerns belong in `api-rest`.

use crate::metadata::MetadataStore;
use crate::repositories::shared::{cleanup_project_dir, create_unique_project_dir, scaffold};
use crate::{ProjectError, ProjectResult};
use api_shared::{Project, SkippedProject, Template};
use autofixer_ids::ProjectId;
use autofixer_types::NonEmptyText;
use std::fs;
use std::io::ErrorKind;
use std::sync::Arc;

/// Result of enumerating the projects root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProjectListing {
    /// Projects with a readable descriptor, sorted by id.
    pub projects: Vec<Project>,
    /// Directories that were skipped, with the reason.
    pub skipped: Vec<SkippedProject>,
}

/// Service for creating, listing, fetching and deleting projects.
#[derive(Clone, Debug)]
pub struct ProjectService {
    store: Arc<MetadataStore>,
}

impl ProjectService {
    pub fn new(store: Arc<MetadataStore>) -> Self {
        Self { store }
    }

    /// Lists every project under the projects root.
    ///
    /// Subdirectories without a descriptor, with an unparsable descriptor, or whose name is not
    /// a valid project id are skipped and reported in [`ProjectListing::skipped`]. A missing
    /// projects root yields an empty listing.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::ProjectsDirRead` if the projects root exists but cannot be read,
    /// for example because it is a regular file.
    pub fn list_projects(&self) -> ProjectResult<ProjectListing> {
        let mut listing = ProjectListing::default();

        let entries = match fs::read_dir(self.store.resolver().root()) {
            Ok(it) => it,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(listing),
            Err(e) => return Err(ProjectError::ProjectsDirRead(e)),
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable projects directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }

            let dir_name = entry.file_name().to_string_lossy().into_owned();
            let project_id = match ProjectId::parse(&dir_name) {
                Ok(id) => id,
                Err(e) => {
                    tracing::warn!("skipping project directory {}: {}", path.display(), e);
                    listing.skipped.push(SkippedProject {
                        id: dir_name,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            match self.store.load(&project_id) {
                Ok(Some(project)) => listing.projects.push(project),
                Ok(None) => {
                    tracing::warn!("skipping project without descriptor: {}", path.display());
                    listing.skipped.push(SkippedProject {
                        id: dir_name,
                        reason: "missing project descriptor".into(),
                    });
                }
                Err(e) => {
                    tracing::warn!("skipping project {}: {}", path.display(), e);
                    listing.skipped.push(SkippedProject {
                        id: dir_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        listing.projects.sort_by(|a, b| a.id.cmp(&b.id));
        listing.skipped.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(listing)
    }

    /// Creates a project named `name`, scaffolded according to `template`.
    ///
    /// `template` is one of `empty`, `basic` or `maven`; absent or blank means `empty`. The name
    /// is stored exactly as given.
    ///
    /// # Errors
    ///
    /// - `ProjectError::InvalidInput` if `name` is blank; nothing is written.
    /// - `ProjectError::UnknownTemplate` if `template` names no known template; nothing is written.
    /// - `ProjectError::ProjectsDirCreation` if the projects root is missing and cannot be created.
    /// - `ProjectError::ProjectDirCreation` if no project directory can be allocated.
    /// - I/O or serialisation errors from scaffolding or saving the descriptor. In that case the
    ///   partially created directory is removed; if removal also fails,
    ///   [`ProjectError::CleanupAfterCreateFailed`] carries both errors.
    pub fn create_project(&self, name: &str, template: Option<&str>) -> ProjectResult<Project> {
        let name = NonEmptyText::new(name)
            .map_err(|_| ProjectError::InvalidInput("Project name is required".into()))?;
        let template = Template::parse_or_default(template)?;

        self.store.cfg().ensure_projects_dir()?;
        let root = self.store.resolver().root();
        let (project_id, project_dir) = create_unique_project_dir(root, ProjectId::generate())?;

        let result = self.populate(&project_id, &project_dir, name, template);
        match result {
            Ok(project) => {
                tracing::info!(
                    "created project {} ({}) from template {}",
                    project.id,
                    project.name,
                    template
                );
                Ok(project)
            }
            Err(create_error) => match cleanup_project_dir(&project_dir) {
                Ok(()) => Err(create_error),
                Err(cleanup_error) => Err(ProjectError::CleanupAfterCreateFailed {
                    path: project_dir,
                    create_error: Box::new(create_error),
                    cleanup_error,
                }),
            },
        }
    }

    fn populate(
        &self,
        project_id: &ProjectId,
        project_dir: &std::path::Path,
        name: NonEmptyText,
        template: Template,
    ) -> ProjectResult<Project> {
        let layout = scaffold(template, project_dir)?;

        let project = Project {
            id: project_id.to_string(),
            name: name.into_string(),
            template,
            files: layout.files,
            folders: layout.folders,
            created_at: project_id
                .created_at_rfc3339()
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
        };

        self.store.save(project_id, &project)?;
        Ok(project)
    }

    /// Fetches a project by id.
    ///
    /// # Errors
    ///
    /// - `ProjectError::InvalidId` if `project_id` is not a safe path segment.
    /// - `ProjectError::ProjectNotFound` if the project has no descriptor.
    pub fn get_project(&self, project_id: &str) -> ProjectResult<Project> {
        let project_id = ProjectId::parse(project_id)?;
        self.store
            .load(&project_id)?
            .ok_or(ProjectError::ProjectNotFound)
    }

    /// Recursively deletes a project directory. Irreversible.
    ///
    /// # Errors
    ///
    /// Returns `ProjectError::ProjectNotFound` if the directory does not exist.
    pub fn delete_project(&self, project_id: &str) -> ProjectResult<()> {
        let project_id = ProjectId::parse(project_id)?;
        let project_dir = self.store.resolver().project_dir(&project_id);

        self.store.locked(&project_id, || {
            if !project_dir.is_dir() {
                return Err(ProjectError::ProjectNotFound);
            }
            fs::remove_dir_all(&project_dir).map_err(ProjectError::ProjectDelete)
        })?;

        tracing::info!("deleted project {}", project_id);
        Ok(())
    }

    /// Placeholder for compiling and running a project.
    ///
    /// Performs no compilation; returns a canned transcript naming the project.
    pub fn run_project(&self, project_id: &str) -> ProjectResult<String> {
        let project = self.get_project(project_id)?;
        Ok(format!(
            "Running project: {}...\nCompilation started...\n",
            project.name
        ))
    }
}
