use crate::domain::{
    entities::{ProjectStructure, ServiceDefinition, Target},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across entities.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_target(target: &Target) -> Result<(), DomainError> {
        target.validate()
    }

    pub fn validate_service(definition: &ServiceDefinition) -> Result<(), DomainError> {
        definition.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}
