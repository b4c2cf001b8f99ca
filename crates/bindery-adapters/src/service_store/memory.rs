//! In-memory service store.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use tracing::{debug, instrument};

use bindery_core::{
    application::{ApplicationError, ports::ServiceStore},
    domain::{DomainError, DomainValidator, ServiceDefinition, ServiceKey},
    error::BinderyResult,
};

use crate::builtin_services;

/// Thread-safe store keyed by catalog key, iterating in registration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceStore {
    services: Arc<RwLock<IndexMap<ServiceKey, ServiceDefinition>>>,
}

impl InMemoryServiceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the built-in services.
    pub fn with_builtin() -> BinderyResult<Self> {
        let store = Self::new();
        for definition in builtin_services::all()? {
            store.insert(definition)?;
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.services.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ServiceStore for InMemoryServiceStore {
    fn get(&self, key: &ServiceKey) -> BinderyResult<ServiceDefinition> {
        let services = self
            .services
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        services.get(key).cloned().ok_or_else(|| {
            DomainError::ServiceNotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> BinderyResult<Vec<ServiceDefinition>> {
        let services = self
            .services
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(services.values().cloned().collect())
    }

    #[instrument(skip_all, fields(service = %definition.location()))]
    fn insert(&self, definition: ServiceDefinition) -> BinderyResult<()> {
        DomainValidator::validate_service(&definition)?;

        let mut services = self
            .services
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        let replaced = services
            .insert(definition.key().clone(), definition)
            .is_some();
        debug!(replaced, "Service registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindery_core::domain::{Framework, TemplateSet};

    fn definition(location: &str, key: &str) -> ServiceDefinition {
        ServiceDefinition::new(location, key)
            .with_templates(Framework::Spring, TemplateSet::new("{}"))
    }

    #[test]
    fn get_unknown_key_is_not_found() {
        let store = InMemoryServiceStore::new();
        let err = store.get(&ServiceKey::from("missing")).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn insert_validates_definitions() {
        let store = InMemoryServiceStore::new();
        assert!(store.insert(definition("dashdb", "dashDb")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn insert_replaces_by_key_and_keeps_order() {
        let store = InMemoryServiceStore::new();
        store.insert(definition("service-a", "a")).unwrap();
        store.insert(definition("service-b", "b")).unwrap();
        store
            .insert(definition("service-a", "a").with_display_name("A"))
            .unwrap();

        let keys: Vec<_> = store
            .list()
            .unwrap()
            .iter()
            .map(|d| d.key().to_string())
            .collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(store.get(&"a".into()).unwrap().display_name(), "A");
    }

    #[test]
    fn builtin_store_has_every_builtin() {
        let store = InMemoryServiceStore::with_builtin().unwrap();
        assert_eq!(store.len(), 3);
        let liberty = store.for_framework(Framework::Liberty).unwrap();
        assert_eq!(liberty.len(), 2);
        assert!(liberty.iter().all(|d| d.supports(Framework::Liberty)));
    }
}
