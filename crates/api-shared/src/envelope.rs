//! Request bodies and the `{success, ...}` response envelopes.
//!
//! Request fields are all optional at the serde level so that a missing field surfaces as a
//! validation error from the service layer rather than as a deserialisation failure.

use crate::model::{Project, ProjectFile, SkippedProject};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProjectReq {
    #[serde(default)]
    pub name: Option<String>,
    /// One of `empty` (default), `basic`, `maven`.
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateFileReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateFileReq {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateFolderReq {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListProjectsRes {
    pub success: bool,
    pub projects: Vec<Project>,
    /// Directories that were not listed because they have no readable descriptor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedProject>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectRes {
    pub success: bool,
    pub project: Project,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileRes {
    pub success: bool,
    pub file: ProjectFile,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileContentRes {
    pub success: bool,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FolderRes {
    pub success: bool,
    pub folder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RunRes {
    pub success: bool,
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageRes {
    pub success: bool,
    pub message: String,
}

impl MessageRes {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
}

/// Body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub success: bool,
    pub error: String,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
