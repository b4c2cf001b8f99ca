// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid target configuration: {0}")]
    InvalidTarget(String),

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid service definition: {0}")]
    InvalidService(String),

    #[error("Invalid service catalog: {0}")]
    InvalidCatalog(String),

    #[error("Rendered config for '{service}' ({framework}) is invalid: {reason}")]
    InvalidConfigFragment {
        service: String,
        framework: String,
        reason: String,
    },

    #[error("Invalid entry '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },

    #[error("Duplicate path in project: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Project structure is empty")]
    EmptyProject,

    // ========================================================================
    // Compatibility Errors
    // ========================================================================
    #[error("unknown framework '{0}'")]
    UnknownFramework(String),

    #[error("unknown build system '{0}'")]
    UnknownBuildSystem(String),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("No service definition for '{key}'")]
    ServiceNotFound { key: String },

    #[error("Service '{key}' is not bound in the catalog")]
    ServiceNotBound { key: String },

    #[error("Service '{service}' has no templates for {framework}")]
    MissingTemplate { service: String, framework: String },

    #[error("Service '{service}' has no value for local-dev key '{key}'")]
    MissingCredential { service: String, key: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
            ],
            Self::UnknownFramework(_) => vec![
                "Supported frameworks:".into(),
                "  • liberty  - Open Liberty / WebSphere Liberty".into(),
                "  • spring   - Spring Boot".into(),
            ],
            Self::UnknownBuildSystem(_) => vec![
                "Supported build systems:".into(),
                "  • maven    - pom.xml".into(),
                "  • gradle   - build.gradle".into(),
            ],
            Self::ServiceNotFound { key } => vec![
                format!("No service definition is registered for '{}'", key),
                "Try: bindery list".into(),
            ],
            Self::ServiceNotBound { key } => vec![
                format!("Add an entry for '{}' to the catalog document", key),
                "Each bound service needs 'serviceInfo' with label, name and plan".into(),
            ],
            Self::MissingTemplate { service, framework } => vec![
                format!("'{}' does not provide templates for {}", service, framework),
                format!("Try: bindery list --framework {}", framework.trim_start_matches("java-")),
            ],
            Self::MissingCredential { service, key } => vec![
                format!("Add '{}' to the credentials of '{}' in the catalog", key, service),
            ],
            Self::InvalidConfigFragment { service, .. } => vec![
                format!("The config.json.template of '{}' did not render to valid JSON", service),
                "Quote string values or use the {{json ...}} helper".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTarget(_)
            | Self::InvalidProjectName { .. }
            | Self::InvalidService(_)
            | Self::InvalidCatalog(_)
            | Self::InvalidConfigFragment { .. }
            | Self::InvalidEntry { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::EmptyProject => ErrorCategory::Validation,
            Self::UnknownFramework(_) | Self::UnknownBuildSystem(_) => {
                ErrorCategory::Compatibility
            }
            Self::ServiceNotFound { .. }
            | Self::ServiceNotBound { .. }
            | Self::MissingTemplate { .. }
            | Self::MissingCredential { .. } => ErrorCategory::NotFound,
            Self::MissingRequiredField { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
