//! Project model as stored in descriptors and returned over the wire.
//!
//! The same structures are written to `project.json` and embedded in API responses, so the
//! field names here are the on-disk format: `{id, name, template, files, folders, createdAt}`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Initial scaffolding policy applied when a project is created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// `src/` only.
    #[default]
    Empty,
    /// `src/` plus an empty `src/Main.java`.
    Basic,
    /// Maven layout: `src/main/java`, `src/test/java` and an empty `pom.xml`.
    Maven,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Empty, Template::Basic, Template::Maven];

    pub const fn as_str(self) -> &'static str {
        match self {
            Template::Empty => "empty",
            Template::Basic => "basic",
            Template::Maven => "maven",
        }
    }

    /// Parses an optional template name, falling back to [`Template::Empty`] when absent or blank.
    pub fn parse_or_default(value: Option<&str>) -> Result<Self, UnknownTemplate> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => v.parse(),
            None => Ok(Template::default()),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a template name is not one of `empty`, `basic` or `maven`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown template '{0}' (expected one of: empty, basic, maven)")]
pub struct UnknownTemplate(pub String);

impl FromStr for Template {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTemplate(s.to_owned()))
    }
}

/// A file tracked in a project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProjectFile {
    /// Base name, e.g. `App.java`.
    pub name: String,
    /// Path relative to the project root; the key within a project.
    pub path: String,
    /// Cached content. May diverge from disk if the file is edited out-of-band.
    #[serde(default)]
    pub content: String,
    /// Extension of `name`, or `txt` when there is none.
    #[serde(rename = "type")]
    pub file_type: String,
}

/// A project descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub template: Template,
    #[serde(default)]
    pub files: Vec<ProjectFile>,
    #[serde(default)]
    pub folders: Vec<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// A project directory that was left out of a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SkippedProject {
    pub id: String,
    pub reason: String,
}
