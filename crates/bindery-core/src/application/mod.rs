//! Application layer for Bindery.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, CatalogService)
//! - **Verification**: the harness that checks generated projects
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod verification;

// Re-export main services
pub use services::{
    CatalogService, GenerateService, GenerationPlan, GenerationReport, GenerationRequest,
    ServiceSummary, // DTO for service listings
};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ServiceStore, TemplateRenderer};

pub use error::ApplicationError;
