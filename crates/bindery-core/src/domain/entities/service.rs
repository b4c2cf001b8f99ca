//! Static service definitions and their per-framework template sets.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::common::RelativePath, error::DomainError, value_objects::Framework,
};

/// Name of the template every framework directory must provide.
pub const CONFIG_TEMPLATE: &str = "config.json.template";

const TEMPLATE_SUFFIX: &str = ".template";

// ── ServiceKey ────────────────────────────────────────────────────────────────

/// Key of a service in the catalog document (e.g. `dashDb`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceKey(String);

impl ServiceKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ServiceKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Template content ──────────────────────────────────────────────────────────

/// Content of a template file.
///
/// Files without placeholders are copied verbatim and never reach the
/// renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateContent {
    Literal(String),
    Parameterized(String),
}

impl TemplateContent {
    /// Classify raw template text by the presence of `{{`.
    pub fn detect(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.contains("{{") {
            Self::Parameterized(text)
        } else {
            Self::Literal(text)
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Literal(t) | Self::Parameterized(t) => t,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Output path relative to the generated project root.
    pub path: RelativePath,
    pub content: TemplateContent,
}

impl TemplateFile {
    /// Build from a path inside `templates/java-<framework>/`. A trailing
    /// `.template` suffix is dropped from the output path.
    pub fn from_source(source_path: &str, text: impl Into<String>) -> Result<Self, DomainError> {
        let output = source_path
            .strip_suffix(TEMPLATE_SUFFIX)
            .unwrap_or(source_path);
        Ok(Self {
            path: RelativePath::try_new(output)?,
            content: TemplateContent::detect(text),
        })
    }
}

// ── TemplateSet ───────────────────────────────────────────────────────────────

/// Templates a service provides for one framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    config: String,
    files: Vec<TemplateFile>,
}

impl TemplateSet {
    pub fn new(config: impl Into<String>) -> Self {
        Self {
            config: config.into(),
            files: Vec::new(),
        }
    }

    pub fn with_file(mut self, file: TemplateFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn push(&mut self, file: TemplateFile) {
        self.files.push(file);
    }

    /// Source of `config.json.template`.
    pub fn config_source(&self) -> &str {
        &self.config
    }

    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }
}

// ── ServiceDefinition ─────────────────────────────────────────────────────────

/// A service this tool knows how to bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    location: String,
    key: ServiceKey,
    display_name: String,
    env_prefix: String,
    local_dev_keys: Vec<String>,
    templates: IndexMap<Framework, TemplateSet>,
    instrumentation: IndexMap<Framework, Vec<RelativePath>>,
}

impl ServiceDefinition {
    /// Start a definition. `location` is the service directory name,
    /// e.g. `service-dashdb`.
    pub fn new(location: impl Into<String>, key: impl Into<ServiceKey>) -> Self {
        let location = location.into();
        let env_prefix = default_env_prefix(&location);
        Self {
            display_name: location.clone(),
            location,
            key: key.into(),
            env_prefix,
            local_dev_keys: Vec::new(),
            templates: IndexMap::new(),
            instrumentation: IndexMap::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn with_local_dev_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.local_dev_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_templates(mut self, framework: Framework, set: TemplateSet) -> Self {
        self.templates.insert(framework, set);
        self
    }

    pub fn with_instrumentation(mut self, framework: Framework, files: Vec<RelativePath>) -> Self {
        self.instrumentation.insert(framework, files);
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }
    pub fn key(&self) -> &ServiceKey {
        &self.key
    }
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }
    pub fn local_dev_keys(&self) -> &[String] {
        &self.local_dev_keys
    }

    pub fn frameworks(&self) -> impl Iterator<Item = Framework> + '_ {
        self.templates.keys().copied()
    }

    pub fn supports(&self, framework: Framework) -> bool {
        self.templates.contains_key(&framework)
    }

    pub fn templates_for(&self, framework: Framework) -> Option<&TemplateSet> {
        self.templates.get(&framework)
    }

    /// Declared instrumentation files, `None` when the service declares none
    /// for this framework.
    pub fn instrumentation_for(&self, framework: Framework) -> Option<&[RelativePath]> {
        self.instrumentation
            .get(&framework)
            .map(Vec::as_slice)
            .filter(|files| !files.is_empty())
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.location.starts_with("service-") {
            return Err(DomainError::InvalidService(format!(
                "location '{}' must start with 'service-'",
                self.location
            )));
        }
        if self.key.as_str().trim().is_empty() {
            return Err(DomainError::InvalidService(format!(
                "'{}' has an empty catalog key",
                self.location
            )));
        }
        if self.templates.is_empty() {
            return Err(DomainError::InvalidService(format!(
                "'{}' declares no frameworks",
                self.location
            )));
        }
        for (framework, files) in &self.instrumentation {
            let Some(set) = self.templates.get(framework) else {
                return Err(DomainError::InvalidService(format!(
                    "'{}' declares instrumentation for {} without templates",
                    self.location, framework
                )));
            };
            if let Some(missing) = files
                .iter()
                .find(|f| !set.files().iter().any(|t| &t.path == *f))
            {
                return Err(DomainError::InvalidService(format!(
                    "'{}' instrumentation file '{}' has no template for {}",
                    self.location, missing, framework
                )));
            }
        }
        Ok(())
    }
}

fn default_env_prefix(location: &str) -> String {
    location
        .strip_prefix("service-")
        .unwrap_or(location)
        .replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_prefix_defaults_from_location() {
        let def = ServiceDefinition::new("service-watson-natural-language-classifier", "nlc");
        assert_eq!(def.env_prefix(), "watson_natural_language_classifier");
        let def = ServiceDefinition::new("service-dashdb", "dashDb");
        assert_eq!(def.env_prefix(), "dashdb");
    }

    #[test]
    fn template_content_is_detected() {
        assert!(TemplateContent::detect("public class A {}").is_literal());
        assert!(!TemplateContent::detect("{{bluemix.test.url}}").is_literal());
    }

    #[test]
    fn template_suffix_is_stripped_from_output_path() {
        let file = TemplateFile::from_source("src/main/java/App.java.template", "x").unwrap();
        assert_eq!(file.path.as_str(), "src/main/java/App.java");
    }

    #[test]
    fn empty_instrumentation_list_counts_as_absent() {
        let def = ServiceDefinition::new("service-a", "a")
            .with_templates(Framework::Liberty, TemplateSet::new("{}"))
            .with_instrumentation(Framework::Liberty, vec![]);
        assert!(def.instrumentation_for(Framework::Liberty).is_none());
    }

    #[test]
    fn instrumentation_must_have_a_template() {
        let def = ServiceDefinition::new("service-a", "a")
            .with_templates(Framework::Liberty, TemplateSet::new("{}"))
            .with_instrumentation(Framework::Liberty, vec![RelativePath::new("src/A.java")]);
        assert!(matches!(def.validate(), Err(DomainError::InvalidService(_))));

        let def = ServiceDefinition::new("service-a", "a")
            .with_templates(
                Framework::Liberty,
                TemplateSet::new("{}").with_file(
                    TemplateFile::from_source("src/A.java", "class A {}").unwrap(),
                ),
            )
            .with_instrumentation(Framework::Liberty, vec![RelativePath::new("src/A.java")]);
        assert!(def.validate().is_ok());
    }
}
