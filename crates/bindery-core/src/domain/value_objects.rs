//! Domain value objects: Framework, BuildSystem, DependencyScope.
//!
//! These are pure value types: `Copy`, equality-by-value, no identity. Each
//! one defines its string representations and a `FromStr` parser. Behaviour
//! that differs per variant (file layout, snippets, verification) lives in
//! `crate::domain::ecosystem`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Framework ────────────────────────────────────────────────────────────────

/// A supported Java application framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Liberty,
    Spring,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::Liberty, Framework::Spring];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Liberty => "liberty",
            Self::Spring => "spring",
        }
    }

    /// Template subdirectory under a service's `templates/` folder.
    pub const fn template_dir(&self) -> &'static str {
        match self {
            Self::Liberty => "java-liberty",
            Self::Spring => "java-spring",
        }
    }

    /// Key used for this framework in a service's instrumentation map.
    pub const fn instrumentation_key(&self) -> &'static str {
        match self {
            Self::Liberty => "java_liberty",
            Self::Spring => "java_spring",
        }
    }

    /// Backend platform tag recorded in generated project metadata.
    pub const fn backend_platform(&self) -> &'static str {
        match self {
            Self::Liberty => "JAVA",
            Self::Spring => "SPRING",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "liberty" | "java-liberty" | "java_liberty" => Ok(Self::Liberty),
            "spring" | "java-spring" | "java_spring" => Ok(Self::Spring),
            _ => Err(DomainError::UnknownFramework(s.to_string())),
        }
    }
}

// ── BuildSystem ──────────────────────────────────────────────────────────────

/// Build system whose manifest receives the generated dependency entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSystem {
    Maven,
    Gradle,
}

impl BuildSystem {
    pub const ALL: [BuildSystem; 2] = [BuildSystem::Maven, BuildSystem::Gradle];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Maven => "maven",
            Self::Gradle => "gradle",
        }
    }

    pub const fn manifest_file(&self) -> &'static str {
        match self {
            Self::Maven => "pom.xml",
            Self::Gradle => "build.gradle",
        }
    }
}

impl fmt::Display for BuildSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maven" | "mvn" => Ok(Self::Maven),
            "gradle" => Ok(Self::Gradle),
            _ => Err(DomainError::UnknownBuildSystem(s.to_string())),
        }
    }
}

// ── DependencyScope ──────────────────────────────────────────────────────────

/// Scope of a dependency declaration. Omitted scopes mean `compile`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
}

impl DependencyScope {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Provided => "provided",
            Self::Runtime => "runtime",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "compile" => Ok(Self::Compile),
            "provided" => Ok(Self::Provided),
            "runtime" => Ok(Self::Runtime),
            "test" => Ok(Self::Test),
            other => Err(DomainError::InvalidEntry {
                name: other.to_string(),
                reason: "unknown dependency scope".into(),
            }),
        }
    }
}
