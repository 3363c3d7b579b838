//! Shared project repository utilities.
//!
//! - **Directory allocation**: [`create_unique_project_dir`] claims a fresh project directory,
//!   stepping past identifiers that are already taken.
//! - **Scaffolding**: [`scaffold`] materialises a [`Template`] on disk and reports the files and
//!   folders to record in the descriptor.
//! - **File types**: [`file_type_for`] derives the descriptor `type` from a file name.

use crate::constants::{DEFAULT_FILE_TYPE, MAX_PROJECT_ALLOCATION_ATTEMPTS};
use crate::paths::common::SrcDir;
use crate::paths::templates::{MainJavaFile, MavenSourceDirs, PomFile};
use crate::{ProjectError, ProjectResult};
use api_shared::{ProjectFile, Template};
use autofixer_ids::ProjectId;
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

/// Derives a file's type from the extension of its name, or `txt` if it has none.
///
/// `Main.java` is `java`, `archive.tar.gz` is `gz`, `Makefile` and `notes.` are `txt`.
pub fn file_type_for(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_string(),
        _ => DEFAULT_FILE_TYPE.to_string(),
    }
}

/// Builds the descriptor entry for a file.
pub(crate) fn project_file(name: &str, path: &str, content: &str) -> ProjectFile {
    ProjectFile {
        name: name.to_string(),
        path: path.to_string(),
        content: content.to_string(),
        file_type: file_type_for(name),
    }
}

/// Creates a unique project directory within the projects root.
///
/// Starts from `first` and, if that directory already exists, moves one millisecond forward,
/// up to [`MAX_PROJECT_ALLOCATION_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns `ProjectError::ProjectDirCreation` if:
/// - directory creation fails for a reason other than the directory existing,
/// - no free identifier was found within the attempt limit.
pub(crate) fn create_unique_project_dir(
    root: &Path,
    first: ProjectId,
) -> ProjectResult<(ProjectId, PathBuf)> {
    let mut candidate_id = first;

    for _attempt in 0..MAX_PROJECT_ALLOCATION_ATTEMPTS {
        let candidate = candidate_id.project_dir(root);

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok((candidate_id, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!("project id {} already taken", candidate_id);
                candidate_id = candidate_id.next();
            }
            Err(e) => return Err(ProjectError::ProjectDirCreation(e)),
        }
    }

    Err(ProjectError::ProjectDirCreation(io::Error::new(
        ErrorKind::AlreadyExists,
        format!(
            "failed to allocate a unique project directory after {} attempts",
            MAX_PROJECT_ALLOCATION_ATTEMPTS
        ),
    )))
}

/// Files and folders produced by a template, in descriptor form.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Scaffold {
    pub files: Vec<ProjectFile>,
    pub folders: Vec<String>,
}

/// Writes the initial layout for `template` into `project_dir`.
pub(crate) fn scaffold(template: Template, project_dir: &Path) -> ProjectResult<Scaffold> {
    let mut out = Scaffold {
        files: Vec::new(),
        folders: vec![SrcDir::NAME.to_string()],
    };

    fs::create_dir_all(project_dir.join(SrcDir::NAME)).map_err(ProjectError::FolderCreation)?;

    match template {
        Template::Empty => {}
        Template::Basic => {
            fs::write(project_dir.join(MainJavaFile::PATH), "").map_err(ProjectError::FileWrite)?;
            out.files
                .push(project_file(MainJavaFile::NAME, MainJavaFile::PATH, ""));
        }
        Template::Maven => {
            for dir in MavenSourceDirs::ALL {
                fs::create_dir_all(project_dir.join(dir)).map_err(ProjectError::FolderCreation)?;
                out.folders.push(dir.to_string());
            }
            fs::write(project_dir.join(PomFile::NAME), "").map_err(ProjectError::FileWrite)?;
            out.files
                .push(project_file(PomFile::NAME, PomFile::NAME, ""));
        }
    }

    Ok(out)
}

/// Removes a partially created project directory.
pub(crate) fn cleanup_project_dir(project_dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(project_dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
