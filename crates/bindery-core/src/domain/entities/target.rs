//! The `Target` aggregate root and its typestate builder.
//!
//! A `Target` is the validated description of the project the user wants to
//! generate: a project name, a framework and a build system. Once a `Target`
//! exists it is guaranteed consistent.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoName` / `HasName`) to enforce
//! at *compile time* that a project name is set before `build()` is reachable.
//! Runtime validation (`validate`) still runs at `build()` for the name rules.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the responsibility
//! of the application and CLI layers, not the domain.

use std::fmt;
use std::marker::PhantomData;

use crate::domain::{
    error::DomainError,
    value_objects::{BuildSystem, Framework},
};

const MAX_NAME_LEN: usize = 64;

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated generation target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    project_name: String,
    framework: Framework,
    build_system: BuildSystem,
}

impl Target {
    /// Start building a new `Target`.
    pub fn builder() -> TargetBuilder<NoName> {
        TargetBuilder::new()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
    pub const fn framework(&self) -> Framework {
        self.framework
    }
    pub const fn build_system(&self) -> BuildSystem {
        self.build_system
    }

    /// Validate this target's internal consistency.
    ///
    /// Called automatically by the builder. Available for re-validation after
    /// external construction.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_project_name(&self.project_name)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} + {})",
            self.project_name, self.framework, self.build_system
        )
    }
}

/// Project names end up as directory names and Maven artifact ids.
pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(invalid("name is longer than 64 characters"));
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(invalid("name must start with a letter"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(invalid(&format!("character '{bad}' is not allowed")));
    }
    Ok(())
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: project name has not yet been set.
pub struct NoName;
/// Marker: project name has been set; the target can now be built.
pub struct HasName;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`Target`].
///
/// Framework defaults to Liberty and build system to Maven when unset.
pub struct TargetBuilder<N> {
    project_name: Option<String>,
    framework: Option<Framework>,
    build_system: Option<BuildSystem>,
    _marker: PhantomData<N>,
}

impl TargetBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            project_name: None,
            framework: None,
            build_system: None,
            _marker: PhantomData,
        }
    }

    /// Set the project name. This transitions the builder to `HasName`.
    pub fn project_name(self, name: impl Into<String>) -> TargetBuilder<HasName> {
        TargetBuilder {
            project_name: Some(name.into()),
            framework: self.framework,
            build_system: self.build_system,
            _marker: PhantomData,
        }
    }
}

impl Default for TargetBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> TargetBuilder<N> {
    pub fn framework(mut self, framework: Framework) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn build_system(mut self, build_system: BuildSystem) -> Self {
        self.build_system = Some(build_system);
        self
    }
}

impl TargetBuilder<HasName> {
    /// Build and validate the `Target`.
    pub fn build(self) -> Result<Target, DomainError> {
        let project_name = self
            .project_name
            .ok_or(DomainError::MissingRequiredField {
                field: "project_name",
            })?;

        let target = Target {
            project_name,
            framework: self.framework.unwrap_or(Framework::Liberty),
            build_system: self.build_system.unwrap_or(BuildSystem::Maven),
        };

        target.validate()?;
        Ok(target)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_liberty_and_maven() {
        let t = Target::builder().project_name("orders").build().unwrap();
        assert_eq!(t.framework(), Framework::Liberty);
        assert_eq!(t.build_system(), BuildSystem::Maven);
    }

    #[test]
    fn framework_may_be_set_before_name() {
        let t = Target::builder()
            .framework(Framework::Spring)
            .build_system(BuildSystem::Gradle)
            .project_name("catalog-api")
            .build()
            .unwrap();
        assert_eq!(t.framework(), Framework::Spring);
        assert_eq!(t.build_system(), BuildSystem::Gradle);
    }

    #[test]
    fn rejects_bad_project_names() {
        for name in ["", "   ", "9lives", "has space", "slash/name"] {
            let result = Target::builder().project_name(name).build();
            assert!(
                matches!(result, Err(DomainError::InvalidProjectName { .. })),
                "expected '{name}' to be rejected"
            );
        }
        let long = "a".repeat(65);
        assert!(Target::builder().project_name(long).build().is_err());
    }

    #[test]
    fn accepts_dots_dashes_and_underscores() {
        assert!(validate_project_name("my.app-v2_final").is_ok());
    }

    #[test]
    fn display_includes_all_fields() {
        let t = Target::builder()
            .project_name("orders")
            .framework(Framework::Spring)
            .build()
            .unwrap();
        assert_eq!(t.to_string(), "orders (spring + maven)");
    }
}
