//! Catalog Service - service definition queries.
//!
//! Handles listing and registering service definitions, and matching them
//! against a catalog document. Separated from GenerateService for single
//! responsibility.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    application::ports::ServiceStore,
    domain::{
        DomainValidator as validator, Framework, ServiceCatalog, ServiceDefinition, ServiceKey,
    },
    error::BinderyResult,
};

/// Information about a service definition for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub location: String,
    pub key: String,
    pub name: String,
    pub frameworks: Vec<String>,
    /// Frameworks for which the service ships instrumentation files.
    pub instrumented: Vec<String>,
    pub local_dev_keys: Vec<String>,
}

impl From<&ServiceDefinition> for ServiceSummary {
    fn from(d: &ServiceDefinition) -> Self {
        Self {
            location: d.location().to_string(),
            key: d.key().to_string(),
            name: d.display_name().to_string(),
            frameworks: d.frameworks().map(|f| f.to_string()).collect(),
            instrumented: d
                .frameworks()
                .filter(|f| d.instrumentation_for(*f).is_some())
                .map(|f| f.to_string())
                .collect(),
            local_dev_keys: d.local_dev_keys().to_vec(),
        }
    }
}

/// Service for definition queries.
pub struct CatalogService {
    store: Box<dyn ServiceStore>,
}

impl CatalogService {
    /// Create a new catalog service.
    pub fn new(store: Box<dyn ServiceStore>) -> Self {
        Self { store }
    }

    /// Get a definition by key.
    pub fn get(&self, key: &ServiceKey) -> BinderyResult<ServiceDefinition> {
        self.store.get(key)
    }

    /// Validate and register a definition.
    #[instrument(skip_all, fields(service = %definition.location()))]
    pub fn register(&self, definition: ServiceDefinition) -> BinderyResult<()> {
        validator::validate_service(&definition)?;
        debug!("Registering service definition");
        self.store.insert(definition)
    }

    /// List all definitions, optionally restricted to one framework.
    pub fn list(&self, framework: Option<Framework>) -> BinderyResult<Vec<ServiceSummary>> {
        let definitions = match framework {
            Some(fw) => self.store.for_framework(fw)?,
            None => self.store.list()?,
        };
        Ok(definitions.iter().map(ServiceSummary::from).collect())
    }

    /// Definitions that have a bound instance in `catalog`.
    pub fn bound_in(&self, catalog: &ServiceCatalog) -> BinderyResult<Vec<ServiceDefinition>> {
        Ok(self
            .store
            .list()?
            .into_iter()
            .filter(|d| catalog.contains(d.key()))
            .collect())
    }
}
