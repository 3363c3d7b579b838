#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("invalid path: {0}")]
    InvalidPath(#[from] autofixer_types::PathError),
    #[error(transparent)]
    InvalidId(#[from] autofixer_ids::IdError),
    #[error(transparent)]
    UnknownTemplate(#[from] api_shared::UnknownTemplate),
    #[error("path escapes the project directory: {0}")]
    PathTraversal(String),
    #[error("'{0}' is reserved for the project descriptor")]
    ReservedPath(String),

    #[error("Project not found")]
    ProjectNotFound,
    #[error("File not found")]
    FileNotFound,

    #[error("failed to read projects directory: {0}")]
    ProjectsDirRead(std::io::Error),
    #[error("failed to create projects directory: {0}")]
    ProjectsDirCreation(std::io::Error),
    #[error("failed to create project directory: {0}")]
    ProjectDirCreation(std::io::Error),
    #[error("failed to create folder: {0}")]
    FolderCreation(std::io::Error),
    #[error(
        "project creation failed and cleanup also failed (path: {path}): create={create_error}; cleanup={cleanup_error}",
        path = path.display()
    )]
    CleanupAfterCreateFailed {
        path: std::path::PathBuf,
        #[source]
        create_error: Box<ProjectError>,
        cleanup_error: std::io::Error,
    },
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete file: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to delete project: {0}")]
    ProjectDelete(std::io::Error),
    #[error("failed to resolve path: {0}")]
    PathResolution(std::io::Error),
    #[error("failed to write project descriptor: {0}")]
    DescriptorWrite(std::io::Error),
    #[error("failed to read project descriptor: {0}")]
    DescriptorRead(std::io::Error),
    #[error("failed to serialize project descriptor: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize project descriptor: {0}")]
    Deserialization(serde_json::Error),
}

/// Coarse classification used by API layers to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed client input.
    Validation,
    /// The project or file does not exist.
    NotFound,
    /// Everything else: I/O, serialisation, cleanup failures.
    Internal,
}

impl ProjectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProjectError::InvalidInput(_)
            | ProjectError::InvalidPath(_)
            | ProjectError::InvalidId(_)
            | ProjectError::UnknownTemplate(_)
            | ProjectError::PathTraversal(_)
            | ProjectError::ReservedPath(_) => ErrorKind::Validation,
            ProjectError::ProjectNotFound | ProjectError::FileNotFound => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }
}

pub type ProjectResult<T> = std::result::Result<T, ProjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classifies_validation_errors() {
        let err = ProjectError::from(autofixer_types::PathError::Empty);
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = ProjectError::InvalidInput("Project name is required".into());
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Project name is required");
    }

    #[test]
    fn test_kind_classifies_not_found_errors() {
        assert_eq!(ProjectError::ProjectNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ProjectError::FileNotFound.to_string(), "File not found");
    }

    #[test]
    fn test_kind_classifies_io_as_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(ProjectError::FileWrite(io).kind(), ErrorKind::Internal);
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(ProjectError::ProjectsDirRead(io).kind(), ErrorKind::Internal);
    }
}
