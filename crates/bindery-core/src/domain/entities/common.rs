use super::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A project-relative path using forward slashes.
///
/// Invariant: never absolute and never escapes the project root via `..`.
/// Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path is not a valid relative path (use `try_new` for
    /// runtime input).
    pub fn new(path: impl AsRef<str>) -> Self {
        match Self::try_new(path.as_ref()) {
            Ok(p) => p,
            Err(e) => panic!("invalid RelativePath: {e}"),
        }
    }

    /// Fallible constructor. Backslashes are normalised to `/`.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalized = path.as_ref().replace('\\', "/");
        let as_path = Path::new(&normalized);

        if normalized.is_empty() {
            return Err(DomainError::InvalidEntry {
                name: normalized,
                reason: "path is empty".into(),
            });
        }
        if as_path.is_absolute() || normalized.starts_with('/') {
            return Err(DomainError::AbsolutePathNotAllowed { path: normalized });
        }
        if as_path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            return Err(DomainError::InvalidEntry {
                name: normalized,
                reason: "path escapes the project root".into(),
            });
        }

        Ok(Self(normalized.trim_start_matches("./").to_string()))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: impl AsRef<str>) -> Result<Self, DomainError> {
        Self::try_new(format!("{}/{}", self.0, segment.as_ref()))
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve against a root directory.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl TryFrom<String> for RelativePath {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<RelativePath> for String {
    fn from(value: RelativePath) -> Self {
        value.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
