//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `bindery-adapters` crate provides implementations.

use crate::domain::{Framework, RenderContext, ServiceDefinition, ServiceKey};
use crate::error::BinderyResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `bindery_adapters::filesystem::LocalFilesystem` (production)
/// - `bindery_adapters::filesystem::MemoryFilesystem` (testing)
///
/// The verification harness reads generated files back through the same
/// port, so a run against `MemoryFilesystem` needs no disk at all.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> BinderyResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> BinderyResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> BinderyResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> BinderyResult<()>;
}

/// Port for service definition storage and retrieval.
///
/// Implemented by:
/// - `bindery_adapters::service_store::InMemoryServiceStore`
pub trait ServiceStore: Send + Sync {
    /// Get a definition by catalog key.
    fn get(&self, key: &ServiceKey) -> BinderyResult<ServiceDefinition>;

    /// List all definitions in registration order.
    fn list(&self) -> BinderyResult<Vec<ServiceDefinition>>;

    /// Definitions that provide templates for `framework`.
    fn for_framework(&self, framework: Framework) -> BinderyResult<Vec<ServiceDefinition>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|d| d.supports(framework))
            .collect())
    }

    /// Insert or replace a definition.
    fn insert(&self, definition: ServiceDefinition) -> BinderyResult<()>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `bindery_adapters::renderer::HandlebarsRenderer`
///
/// Rendering is pure text in, text out. Referencing a path missing from the
/// context is an error, never an empty string.
pub trait TemplateRenderer: Send + Sync {
    fn render_str(&self, template: &str, context: &RenderContext) -> BinderyResult<String>;
}
