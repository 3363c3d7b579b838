//! Validated text types shared across the AutoFixer workspace.
//!
//! - [`NonEmptyText`] for required, user-supplied names.
//! - [`RelativeProjectPath`] for client-supplied paths inside a project. Parsing is purely
//!   lexical: it never touches the filesystem. Symlink checks live in the core crate.

use std::fmt;
use std::path::{Path, PathBuf};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Required text that is not blank.
///
/// Blankness is judged on the trimmed input, but the text is kept exactly as supplied, so a name
/// such as `"  Demo  "` round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, returning `TextError::Empty` for blank input.
    pub fn new(input: impl Into<String>) -> Result<Self, TextError> {
        let input = input.into();
        if input.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(input))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Errors produced while parsing a [`RelativeProjectPath`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PathError {
    #[error("path cannot be empty")]
    Empty,
    #[error("path must be relative to the project root: '{0}'")]
    Absolute(String),
    #[error("path must not contain '..' segments: '{0}'")]
    Traversal(String),
    #[error("path contains an invalid character: '{0}'")]
    InvalidCharacter(String),
}

/// A project-relative path that cannot leave its project root lexically.
///
/// Segments are separated by `/`. Empty and `.` segments are dropped, so `./src//App.java`
/// normalises to `src/App.java`. Absolute paths, `..` segments, backslashes and NUL bytes are
/// rejected. The normalised string is the key used in project descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeProjectPath {
    normalised: String,
}

impl RelativeProjectPath {
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.trim().is_empty() {
            return Err(PathError::Empty);
        }
        if input.contains('\0') || input.contains('\\') {
            return Err(PathError::InvalidCharacter(input.escape_default().to_string()));
        }
        if input.starts_with('/') {
            return Err(PathError::Absolute(input.to_owned()));
        }

        let mut segments = Vec::new();
        for segment in input.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(PathError::Traversal(input.to_owned())),
                s => segments.push(s),
            }
        }

        if segments.is_empty() {
            return Err(PathError::Empty);
        }

        // Reject drive prefixes such as `C:` on the first segment.
        if segments[0].len() == 2 && segments[0].ends_with(':') {
            return Err(PathError::Absolute(input.to_owned()));
        }

        Ok(Self {
            normalised: segments.join("/"),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.normalised
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.normalised.split('/')
    }

    /// Joins this path onto `base` segment by segment.
    pub fn join_onto(&self, base: &Path) -> PathBuf {
        self.segments()
            .fold(base.to_path_buf(), |acc, segment| acc.join(segment))
    }
}

impl fmt::Display for RelativeProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty_text_keeps_input_as_given() {
        let text = NonEmptyText::new("  Demo  ").unwrap();
        assert_eq!(text.as_str(), "  Demo  ");
        assert_eq!(text.into_string(), "  Demo  ");
    }

    #[test]
    fn test_non_empty_text_rejects_whitespace() {
        assert_eq!(NonEmptyText::new("   ").unwrap_err(), TextError::Empty);
        assert_eq!(NonEmptyText::new("").unwrap_err(), TextError::Empty);
    }

    #[test]
    fn test_relative_path_normalises_segments() {
        let path = RelativeProjectPath::parse("./src//main/./App.java").unwrap();
        assert_eq!(path.as_str(), "src/main/App.java");
        assert_eq!(path.segments().count(), 3);
    }

    #[test]
    fn test_relative_path_single_segment() {
        let path = RelativeProjectPath::parse("pom.xml").unwrap();
        assert_eq!(path.as_str(), "pom.xml");
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["pom.xml"]);
    }

    #[test]
    fn test_relative_path_rejects_traversal() {
        assert!(matches!(
            RelativeProjectPath::parse("../other/secret.txt"),
            Err(PathError::Traversal(_))
        ));
        assert!(matches!(
            RelativeProjectPath::parse("src/../../etc/passwd"),
            Err(PathError::Traversal(_))
        ));
    }

    #[test]
    fn test_relative_path_rejects_absolute() {
        assert!(matches!(
            RelativeProjectPath::parse("/etc/passwd"),
            Err(PathError::Absolute(_))
        ));
        assert!(matches!(
            RelativeProjectPath::parse("C:/Windows"),
            Err(PathError::Absolute(_))
        ));
    }

    #[test]
    fn test_relative_path_rejects_backslash_and_nul() {
        assert!(matches!(
            RelativeProjectPath::parse("src\\App.java"),
            Err(PathError::InvalidCharacter(_))
        ));
        assert!(matches!(
            RelativeProjectPath::parse("src/\0"),
            Err(PathError::InvalidCharacter(_))
        ));
    }

    #[test]
    fn test_relative_path_rejects_empty_after_normalising() {
        assert_eq!(RelativeProjectPath::parse("").unwrap_err(), PathError::Empty);
        assert_eq!(RelativeProjectPath::parse("./.").unwrap_err(), PathError::Empty);
    }

    #[test]
    fn test_join_onto_builds_nested_path() {
        let path = RelativeProjectPath::parse("src/main/java").unwrap();
        let joined = path.join_onto(Path::new("/projects/1700000000000"));
        assert_eq!(
            joined,
            PathBuf::from("/projects/1700000000000/src/main/java")
        );
    }
}
