//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project" or "list services".

pub mod catalog_service;
pub mod generate_service;

pub use catalog_service::{CatalogService, ServiceSummary};
pub use generate_service::{GenerateService, GenerationPlan, GenerationReport, GenerationRequest};
