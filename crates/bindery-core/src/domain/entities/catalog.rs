//! The service catalog document and resolved service descriptors.
//!
//! The catalog is the `bluemix.json` shaped document describing which service
//! instances are bound to an application:
//!
//! ```json
//! {
//!   "backendPlatform": "JAVA",
//!   "cloudant": {
//!     "serviceInfo": { "label": "cloudantNoSQLDB", "name": "my-db", "plan": "Lite" },
//!     "url": "https://account.cloudant.com",
//!     "username": "user",
//!     "password": "secret"
//!   }
//! }
//! ```
//!
//! Top-level objects carrying `serviceInfo` are service instances; anything
//! else stays in the raw document only, where templates can still see it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{
    entities::{
        common::RelativePath,
        fragment::EnvEntry,
        service::{ServiceDefinition, ServiceKey, TemplateSet},
    },
    error::DomainError,
    value_objects::Framework,
};

const SERVICE_INFO: &str = "serviceInfo";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub label: String,
    pub name: String,
    pub plan: String,
}

/// One bound service instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "serviceInfo")]
    pub service_info: ServiceInfo,
    /// Every other field of the instance object.
    #[serde(flatten)]
    pub credentials: IndexMap<String, Value>,
}

impl ServiceInstance {
    /// Scalar credential as text. `url` falls back to the instance URL.
    pub fn credential(&self, key: &str) -> Option<String> {
        match self.credentials.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => (key == "url").then(|| self.url.clone()).flatten(),
            Some(other) => Some(other.to_string()),
        }
    }
}

// ── ServiceCatalog ────────────────────────────────────────────────────────────

/// The parsed catalog. Read-only once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCatalog {
    raw: Value,
    instances: IndexMap<ServiceKey, ServiceInstance>,
}

impl ServiceCatalog {
    pub fn from_json_str(text: &str) -> Result<Self, DomainError> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|e| DomainError::InvalidCatalog(format!("not valid JSON: {e}")))?;
        Self::from_value(raw)
    }

    pub fn from_value(raw: Value) -> Result<Self, DomainError> {
        let Value::Object(entries) = &raw else {
            return Err(DomainError::InvalidCatalog(
                "top level must be a JSON object".into(),
            ));
        };

        let mut instances = IndexMap::new();
        for (key, value) in entries {
            if let Some(instance) = parse_instance(key, value)? {
                instances.insert(ServiceKey::new(key.clone()), instance);
            }
        }

        Ok(Self { raw, instances })
    }

    pub fn empty() -> Self {
        Self {
            raw: Value::Object(Map::new()),
            instances: IndexMap::new(),
        }
    }

    /// Return a copy with one more top-level entry bound.
    pub fn with_entry(&self, key: &str, value: Value) -> Result<Self, DomainError> {
        let mut raw = self.raw.clone();
        if let Value::Object(map) = &mut raw {
            map.insert(key.to_string(), value);
        }
        Self::from_value(raw)
    }

    /// The document exactly as loaded, used as the render context.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn get(&self, key: &ServiceKey) -> Option<&ServiceInstance> {
        self.instances.get(key)
    }

    pub fn contains(&self, key: &ServiceKey) -> bool {
        self.instances.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ServiceKey> {
        self.instances.keys()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

fn parse_instance(key: &str, value: &Value) -> Result<Option<ServiceInstance>, DomainError> {
    let Value::Object(fields) = value else {
        return Ok(None);
    };
    if !fields.contains_key(SERVICE_INFO) {
        return Ok(None);
    }
    serde_json::from_value(value.clone())
        .map(Some)
        .map_err(|e| DomainError::InvalidCatalog(format!("entry '{key}': {e}")))
}

// ── ServiceDescriptor ─────────────────────────────────────────────────────────

/// A definition joined with its bound instance.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    definition: ServiceDefinition,
    instance: ServiceInstance,
    local_dev: Vec<EnvEntry>,
}

impl ServiceDescriptor {
    /// Resolve local-development entries `<prefix>_<key>` from the instance
    /// credentials. Every declared key must have a value.
    pub fn resolve(
        definition: &ServiceDefinition,
        catalog: &ServiceCatalog,
    ) -> Result<Self, DomainError> {
        let instance = catalog
            .get(definition.key())
            .ok_or_else(|| DomainError::ServiceNotBound {
                key: definition.key().to_string(),
            })?;

        let local_dev = definition
            .local_dev_keys()
            .iter()
            .map(|key| {
                let value =
                    instance
                        .credential(key)
                        .ok_or_else(|| DomainError::MissingCredential {
                            service: definition.location().to_string(),
                            key: key.clone(),
                        })?;
                Ok(EnvEntry::new(
                    format!("{}_{}", definition.env_prefix(), key),
                    value,
                ))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(Self {
            definition: definition.clone(),
            instance: instance.clone(),
            local_dev,
        })
    }

    pub fn key(&self) -> &ServiceKey {
        self.definition.key()
    }
    pub fn location(&self) -> &str {
        self.definition.location()
    }
    pub fn display_name(&self) -> &str {
        self.definition.display_name()
    }
    pub fn label(&self) -> &str {
        &self.instance.service_info.label
    }
    pub fn definition(&self) -> &ServiceDefinition {
        &self.definition
    }
    pub fn instance(&self) -> &ServiceInstance {
        &self.instance
    }

    /// Local-development environment entries, in declaration order.
    pub fn local_dev(&self) -> &[EnvEntry] {
        &self.local_dev
    }

    pub fn templates_for(&self, framework: Framework) -> Option<&TemplateSet> {
        self.definition.templates_for(framework)
    }

    pub fn instrumentation_for(&self, framework: Framework) -> Option<&[RelativePath]> {
        self.definition.instrumentation_for(framework)
    }

    /// `(env name, search patterns)` per local-dev key, for `mappings.json`.
    pub fn search_patterns(&self) -> Vec<(String, Vec<String>)> {
        self.definition
            .local_dev_keys()
            .iter()
            .zip(&self.local_dev)
            .map(|(key, entry)| {
                (
                    entry.name.clone(),
                    vec![
                        format!(
                            "cloudfoundry:$['{}'][0].credentials.{}",
                            self.label(),
                            key
                        ),
                        format!("env:{}", entry.name),
                    ],
                )
            })
            .collect()
    }
}
