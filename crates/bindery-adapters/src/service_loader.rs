//! Filesystem-based service loader.
//!
//! Loads one service definition from a directory laid out like a built-in
//! service, so extra services can be added without rebuilding.
//!
//! # Directory layout expected
//!
//! ```text
//! service-test/
//! ├── service.toml                 ← manifest (required)
//! └── templates/
//!     └── java-liberty/
//!         ├── config.json.template ← required per declared framework
//!         └── src/main/java/application/test/TestClient.java
//! ```
//!
//! # `service.toml` format
//!
//! ```toml
//! [service]
//! location   = "service-test"        # must start with "service-"
//! key        = "test"                # catalog key
//! name       = "Test Service"        # optional
//! env_prefix = "test"                # optional, derived from location
//! frameworks = ["liberty"]           # liberty | spring
//!
//! [local_dev]
//! keys = ["url"]
//!
//! [instrumentation]
//! java_liberty = ["src/main/java/application/test/TestClient.java"]
//! ```
//!
//! Every file under `templates/java-<framework>/` other than
//! `config.json.template` is copied into the generated project at the same
//! relative path, with a trailing `.template` suffix dropped.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, instrument};
use walkdir::WalkDir;

use bindery_core::{
    application::ApplicationError,
    domain::{
        CONFIG_TEMPLATE, DomainValidator, Framework, RelativePath, ServiceDefinition,
        TemplateFile, TemplateSet,
    },
    error::BinderyResult,
};

const MANIFEST_FILE: &str = "service.toml";
const TEMPLATES_DIR: &str = "templates";

// ── Manifest types ────────────────────────────────────────────────────────────

/// Deserialised `service.toml`.
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceManifest {
    pub service: ServiceSection,
    #[serde(default)]
    pub local_dev: LocalDevSection,
    /// Instrumentation files keyed by `java_<framework>`.
    #[serde(default)]
    pub instrumentation: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceSection {
    pub location: String,
    pub key: String,
    pub name: Option<String>,
    pub env_prefix: Option<String>,
    pub frameworks: Vec<Framework>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LocalDevSection {
    #[serde(default)]
    pub keys: Vec<String>,
}

// ── Loader ────────────────────────────────────────────────────────────────────

/// Loads [`ServiceDefinition`]s from explicitly configured directories.
///
/// Unlike a discovery scan, a directory that fails to load is an error: it
/// was named in configuration, so silently skipping it would hide a typo.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilesystemServiceLoader;

impl FilesystemServiceLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load every directory in order.
    pub fn load_all<P: AsRef<Path>>(&self, dirs: &[P]) -> BinderyResult<Vec<ServiceDefinition>> {
        dirs.iter().map(|dir| self.load(dir.as_ref())).collect()
    }

    /// Load one service directory.
    #[instrument(skip(self), fields(dir = %dir.display()))]
    pub fn load(&self, dir: &Path) -> BinderyResult<ServiceDefinition> {
        let fail = |reason: String| ApplicationError::ServiceLoadFailed {
            path: dir.to_path_buf(),
            reason,
        };

        let manifest_path = dir.join(MANIFEST_FILE);
        if !manifest_path.is_file() {
            return Err(fail(format!("missing {MANIFEST_FILE}")).into());
        }
        let raw = fs::read_to_string(&manifest_path)
            .map_err(|e| fail(format!("failed to read {MANIFEST_FILE}: {e}")))?;
        let manifest: ServiceManifest = toml::from_str(&raw)
            .map_err(|e| fail(format!("failed to parse {MANIFEST_FILE}: {e}")))?;

        let section = &manifest.service;
        let mut definition = ServiceDefinition::new(&section.location, section.key.as_str())
            .with_local_dev_keys(manifest.local_dev.keys.iter().cloned());
        if let Some(name) = &section.name {
            definition = definition.with_display_name(name);
        }
        if let Some(prefix) = &section.env_prefix {
            definition = definition.with_env_prefix(prefix);
        }

        for &framework in &section.frameworks {
            let set = load_template_set(&dir.join(TEMPLATES_DIR).join(framework.template_dir()))
                .map_err(fail)?;
            definition = definition.with_templates(framework, set);
        }

        for (key, files) in &manifest.instrumentation {
            let framework = section
                .frameworks
                .iter()
                .copied()
                .find(|f| f.instrumentation_key() == key.as_str())
                .ok_or_else(|| fail(format!("instrumentation for undeclared framework '{key}'")))?;
            let paths = files
                .iter()
                .map(RelativePath::try_new)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| fail(e.to_string()))?;
            definition = definition.with_instrumentation(framework, paths);
        }

        DomainValidator::validate_service(&definition).map_err(|e| fail(e.to_string()))?;
        debug!(service = %definition.location(), key = %definition.key(), "Loaded service");
        Ok(definition)
    }
}

/// Read `config.json.template` and every other file under one framework
/// directory.
fn load_template_set(dir: &Path) -> Result<TemplateSet, String> {
    if !dir.is_dir() {
        return Err(format!("missing template directory {}", dir.display()));
    }
    let config_path = dir.join(CONFIG_TEMPLATE);
    let config = fs::read_to_string(&config_path)
        .map_err(|e| format!("failed to read {}: {e}", config_path.display()))?;
    let mut set = TemplateSet::new(config);

    let mut sources: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|e| format!("directory walk error: {e}"))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(dir)
            .map_err(|_| format!("failed to relativise '{}'", entry.path().display()))?;
        let rel = normalize_path(&rel.to_string_lossy());
        if rel == CONFIG_TEMPLATE {
            continue;
        }
        sources.push((rel, entry.into_path()));
    }
    // Walk order is platform dependent
    sources.sort();

    for (rel, path) in sources {
        let text = fs::read_to_string(&path).map_err(|e| format!("failed to read '{rel}': {e}"))?;
        let file = TemplateFile::from_source(&rel, text).map_err(|e| e.to_string())?;
        set.push(file);
    }
    Ok(set)
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}
