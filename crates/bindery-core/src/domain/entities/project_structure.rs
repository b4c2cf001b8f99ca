use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::domain::{entities::common::RelativePath, error::DomainError};

/// Final project tree ready for materialization.
///
/// This is the output of the generation pipeline. It contains no business
/// logic, only data. Directories are implied by file paths.
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    pub(crate) root: PathBuf,
    pub(crate) files: Vec<FileToWrite>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: Vec::new(),
        }
    }

    pub fn add_file(&mut self, path: RelativePath, content: impl Into<String>) {
        self.files.push(FileToWrite {
            path,
            content: content.into(),
        });
    }

    pub fn with_file(mut self, path: RelativePath, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyProject);
        }

        let mut seen = HashSet::new();
        for file in &self.files {
            if !seen.insert(file.path.as_str()) {
                return Err(DomainError::DuplicatePath {
                    path: file.path.to_string(),
                });
            }
            if file.path.as_path().is_absolute() {
                return Err(DomainError::AbsolutePathNotAllowed {
                    path: file.path.to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.files.iter()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path.as_str() == path)
    }

    pub fn file(&self, path: &str) -> Option<&FileToWrite> {
        self.files.iter().find(|f| f.path.as_str() == path)
    }

    /// Distinct parent directories, shallowest first.
    pub fn directories(&self) -> Vec<RelativePath> {
        let mut dirs: Vec<RelativePath> = self
            .files
            .iter()
            .filter_map(|f| f.path.as_str().rsplit_once('/').map(|(dir, _)| dir))
            .collect::<HashSet<_>>()
            .into_iter()
            .filter_map(|d| RelativePath::try_new(d).ok())
            .collect();
        dirs.sort_by_key(|d| (d.as_str().matches('/').count(), d.to_string()));
        dirs
    }

    pub fn entry_count(&self) -> usize {
        self.files.len()
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
}

impl FileToWrite {
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
