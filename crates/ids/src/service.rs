//! Internal implementation of project identifiers.

use crate::{IdError, IdResult};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use std::fmt;
use std::path::{Path, PathBuf};

/// Upper bound on the length of a client-supplied identifier.
const MAX_ID_LEN: usize = 64;

/// A project identifier that is always safe to use as a single directory name.
///
/// # Construction
/// - [`ProjectId::generate`] allocates a canonical identifier from the current time.
/// - [`ProjectId::from_millis`] builds a canonical identifier from an explicit timestamp.
/// - [`ProjectId::parse`] validates an externally supplied identifier (URL segment, CLI arg).
///
/// Once constructed, joining the identifier onto a directory can never produce a path outside
/// that directory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generates a canonical identifier from the current UTC time in milliseconds.
    pub fn generate() -> Self {
        Self::from_millis(Utc::now().timestamp_millis())
    }

    /// Builds a canonical identifier from a millisecond timestamp.
    pub fn from_millis(millis: i64) -> Self {
        Self(millis.max(0).to_string())
    }

    /// Validates an identifier supplied from outside the core.
    ///
    /// Accepts ASCII alphanumerics plus `-`, `_` and `.`, up to 64 characters. The special
    /// segments `.` and `..` are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is not a safe single path segment.
    pub fn parse(input: &str) -> IdResult<Self> {
        if Self::is_safe_segment(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(IdError::InvalidInput(format!(
            "expected a single path segment of letters, digits, '-', '_' or '.', got: '{}'",
            input.escape_default()
        )))
    }

    /// Returns true if `input` can be used as a project directory name.
    pub fn is_safe_segment(input: &str) -> bool {
        !input.is_empty()
            && input.len() <= MAX_ID_LEN
            && input != "."
            && input != ".."
            && input
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
    }

    /// Returns true if `input` has the shape produced by [`ProjectId::generate`].
    pub fn is_canonical(input: &str) -> bool {
        !input.is_empty() && input.len() <= 19 && input.bytes().all(|b| b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The millisecond timestamp encoded in a canonical identifier.
    pub fn millis(&self) -> Option<i64> {
        if Self::is_canonical(&self.0) {
            self.0.parse().ok()
        } else {
            None
        }
    }

    /// The creation instant encoded in a canonical identifier.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.millis()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }

    /// [`ProjectId::created_at`] rendered as RFC 3339 with millisecond precision.
    pub fn created_at_rfc3339(&self) -> Option<String> {
        self.created_at()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// The canonical identifier one millisecond later.
    ///
    /// Used to step past an identifier that is already taken. Non-canonical identifiers fall
    /// back to the current time.
    pub fn next(&self) -> Self {
        match self.millis() {
            Some(ms) => Self::from_millis(ms.saturating_add(1)),
            None => Self::generate(),
        }
    }

    /// Returns `parent_dir/<id>/`.
    pub fn project_dir(&self, parent_dir: &Path) -> PathBuf {
        parent_dir.join(&self.0)
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
