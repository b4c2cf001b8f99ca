// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Bindery.
//!
//! This module contains pure business logic: the service catalog, service
//! definitions, the generation target and the per-ecosystem output rules.
//! Rendering and I/O are handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No logging**: `tracing` stays in the application layer
//! - **Immutable entities**: catalog and definitions never change after load
//! - **Closed dispatch**: frameworks and build systems map to profiles by `match`
//!
// Public API - what the world sees
pub mod ecosystem;
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    catalog::{ServiceCatalog, ServiceDescriptor, ServiceInfo, ServiceInstance},
    common::RelativePath,
    fragment::{BuildProperty, ConfigFragment, Dependency, EnvEntry, Exclusion, JndiEntry},
    project_structure::{FileToWrite, ProjectStructure},
    render_context::RenderContext,
    service::{
        CONFIG_TEMPLATE, ServiceDefinition, ServiceKey, TemplateContent, TemplateFile,
        TemplateSet,
    },
    target::{Target, TargetBuilder},
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{BuildSystem, DependencyScope, Framework};

pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn framework_parses_correctly() {
        assert_eq!(Framework::from_str("liberty").unwrap(), Framework::Liberty);
        assert_eq!(
            Framework::from_str("java-spring").unwrap(),
            Framework::Spring
        );
        assert_eq!(Framework::from_str("SPRING").unwrap(), Framework::Spring);
        assert!(matches!(
            Framework::from_str("node"),
            Err(DomainError::UnknownFramework(_))
        ));
    }

    #[test]
    fn framework_naming_conventions() {
        assert_eq!(Framework::Liberty.template_dir(), "java-liberty");
        assert_eq!(Framework::Spring.instrumentation_key(), "java_spring");
        assert_eq!(Framework::Liberty.backend_platform(), "JAVA");
        assert_eq!(Framework::Spring.backend_platform(), "SPRING");
    }

    #[test]
    fn build_system_parses_correctly() {
        assert_eq!(BuildSystem::from_str("mvn").unwrap(), BuildSystem::Maven);
        assert_eq!(BuildSystem::from_str("Gradle").unwrap(), BuildSystem::Gradle);
        assert!(BuildSystem::from_str("ant").is_err());
        assert_eq!(BuildSystem::Gradle.manifest_file(), "build.gradle");
    }

    #[test]
    fn dependency_scope_default_is_compile() {
        assert_eq!(DependencyScope::default(), DependencyScope::Compile);
        assert_eq!(
            DependencyScope::from_str("provided").unwrap(),
            DependencyScope::Provided
        );
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn error_categories() {
        assert_eq!(
            DomainError::UnknownFramework("node".into()).category(),
            ErrorCategory::Compatibility
        );
        assert_eq!(
            DomainError::ServiceNotBound { key: "x".into() }.category(),
            ErrorCategory::NotFound
        );
        assert_eq!(DomainError::EmptyProject.category(), ErrorCategory::Validation);
    }

    #[test]
    fn unknown_framework_suggests_alternatives() {
        let suggestions = DomainError::UnknownFramework("node".into()).suggestions();
        assert!(suggestions.iter().any(|s| s.contains("liberty")));
        assert!(suggestions.iter().any(|s| s.contains("spring")));
    }

    // ========================================================================
    // Validator Tests
    // ========================================================================

    #[test]
    fn validator_delegates_to_entities() {
        let target = Target::builder().project_name("ok").build().unwrap();
        assert!(DomainValidator::validate_target(&target).is_ok());

        let def = ServiceDefinition::new("dashdb", "dashDb")
            .with_templates(Framework::Liberty, TemplateSet::new("{}"));
        assert!(DomainValidator::validate_service(&def).is_err());

        let empty = ProjectStructure::new("out");
        assert!(DomainValidator::validate_project_structure(&empty).is_err());
    }
}
