pub mod catalog;
pub mod common;
pub mod fragment;
pub mod project_structure;
pub mod render_context;
pub mod service;
pub mod target;

pub use crate::domain::DomainError;
pub use catalog::{ServiceCatalog, ServiceDescriptor};
pub use fragment::ConfigFragment;
pub use project_structure::ProjectStructure;
pub use service::{ServiceDefinition, TemplateSet};
pub use target::Target;
