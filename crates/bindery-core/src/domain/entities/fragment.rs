//! Build entries and the config fragment rendered from `config.json.template`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, value_objects::DependencyScope};

// ── Build entries ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    pub group_id: String,
    pub artifact_id: String,
}

/// A build-manifest dependency. Scope defaults to `compile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: DependencyScope,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<Exclusion>,
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: Some(version.into()),
            scope: DependencyScope::default(),
            exclusions: Vec::new(),
        }
    }

    pub fn with_scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_exclusion(
        mut self,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        self.exclusions.push(Exclusion {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        });
        self
    }

    /// `groupId:artifactId`, the de-duplication key.
    pub fn coordinate(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildProperty {
    pub name: String,
    pub value: String,
}

impl BuildProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Environment variable entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvEntry {
    pub name: String,
    pub value: String,
}

impl EnvEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// JNDI binding (Liberty only).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JndiEntry {
    pub name: String,
    pub value: String,
}

impl JndiEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ── ConfigFragment ────────────────────────────────────────────────────────────

/// The JSON a service's `config.json.template` renders to. Every field is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFragment {
    pub dependencies: Vec<Dependency>,
    pub properties: Vec<BuildProperty>,
    pub env_entries: Vec<EnvEntry>,
    pub jndi_entries: Vec<JndiEntry>,
    pub features: Vec<String>,
}

impl ConfigFragment {
    /// Parse rendered config text. Errors name the service and framework.
    pub fn parse(text: &str, service: &str, framework: &str) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidConfigFragment {
            service: service.to_string(),
            framework: framework.to_string(),
            reason,
        };

        let fragment: Self = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;

        if let Some(dep) = fragment
            .dependencies
            .iter()
            .find(|d| d.group_id.trim().is_empty() || d.artifact_id.trim().is_empty())
        {
            return Err(invalid(format!(
                "dependency '{}' needs both groupId and artifactId",
                dep.coordinate()
            )));
        }
        let names = fragment
            .properties
            .iter()
            .map(|p| &p.name)
            .chain(fragment.env_entries.iter().map(|e| &e.name))
            .chain(fragment.jndi_entries.iter().map(|j| &j.name));
        for name in names {
            if name.trim().is_empty() {
                return Err(invalid("entry with an empty name".into()));
            }
        }
        // Property names become manifest element names.
        if let Some(prop) = fragment.properties.iter().find(|p| !is_xml_name(&p.name)) {
            return Err(invalid(format!(
                "property name '{}' is not a valid XML element name",
                prop.name
            )));
        }

        Ok(fragment)
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
            && self.properties.is_empty()
            && self.env_entries.is_empty()
            && self.jndi_entries.is_empty()
            && self.features.is_empty()
    }

    /// Append `other`, keeping the first occurrence of every dependency
    /// coordinate, feature, property, env and JNDI name.
    pub fn merge(&mut self, other: ConfigFragment) {
        extend_unique(&mut self.dependencies, other.dependencies, Dependency::coordinate);
        extend_unique(&mut self.properties, other.properties, |p| p.name.clone());
        extend_unique(&mut self.env_entries, other.env_entries, |e| e.name.clone());
        extend_unique(&mut self.jndi_entries, other.jndi_entries, |j| j.name.clone());
        extend_unique(&mut self.features, other.features, Clone::clone);
    }

    pub fn add_dependency(&mut self, dependency: Dependency) {
        self.merge(ConfigFragment {
            dependencies: vec![dependency],
            ..Default::default()
        });
    }

    pub fn add_feature(&mut self, feature: impl Into<String>) {
        self.merge(ConfigFragment {
            features: vec![feature.into()],
            ..Default::default()
        });
    }
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_')
        && !name.to_ascii_lowercase().starts_with("xml")
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn extend_unique<T>(into: &mut Vec<T>, items: Vec<T>, key: impl Fn(&T) -> String) {
    let mut seen: HashSet<String> = into.iter().map(&key).collect();
    for item in items {
        if seen.insert(key(&item)) {
            into.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_defaults_to_compile() {
        let f = ConfigFragment::parse(
            r#"{"dependencies":[{"groupId":"g","artifactId":"a","version":"1"}]}"#,
            "service-x",
            "java-liberty",
        )
        .unwrap();
        assert_eq!(f.dependencies[0].scope, DependencyScope::Compile);
    }

    #[test]
    fn all_sections_are_optional() {
        let f = ConfigFragment::parse("{}", "service-x", "java-spring").unwrap();
        assert!(f.is_empty());
    }

    #[test]
    fn invalid_json_names_service_and_framework() {
        let err = ConfigFragment::parse("{ nope", "service-x", "java-spring").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("service-x"));
        assert!(msg.contains("java-spring"));
    }

    #[test]
    fn empty_coordinates_are_rejected() {
        let result = ConfigFragment::parse(
            r#"{"dependencies":[{"groupId":"","artifactId":"a"}]}"#,
            "service-x",
            "java-liberty",
        );
        assert!(matches!(
            result,
            Err(DomainError::InvalidConfigFragment { .. })
        ));
    }

    #[test]
    fn property_names_must_be_element_names() {
        for name in ["bad name<", "1st.version", "a>b", "xml.version"] {
            let text = format!(r#"{{"properties":[{{"name":"{name}","value":"1"}}]}}"#);
            let result = ConfigFragment::parse(&text, "service-x", "java-liberty");
            assert!(
                matches!(result, Err(DomainError::InvalidConfigFragment { .. })),
                "{name} should be rejected"
            );
        }

        let ok = ConfigFragment::parse(
            r#"{"properties":[{"name":"cloudant_client.version-2","value":"2.7.0"}]}"#,
            "service-x",
            "java-liberty",
        )
        .unwrap();
        assert_eq!(ok.properties[0].name, "cloudant_client.version-2");
    }

    #[test]
    fn merge_keeps_first_dependency_and_feature() {
        let mut a = ConfigFragment::default();
        a.add_dependency(Dependency::new("g", "a", "1.0"));
        a.add_feature("jndi-1.0");

        let mut b = ConfigFragment::default();
        b.add_dependency(Dependency::new("g", "a", "2.0").with_scope(DependencyScope::Provided));
        b.add_dependency(Dependency::new("g", "b", "1.0"));
        b.add_feature("jndi-1.0");
        b.add_feature("cdi-1.2");

        a.merge(b);
        assert_eq!(a.dependencies.len(), 2);
        assert_eq!(a.dependencies[0].version.as_deref(), Some("1.0"));
        assert_eq!(a.features, ["jndi-1.0", "cdi-1.2"]);
    }
}
