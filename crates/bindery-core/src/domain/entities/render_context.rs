use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::entities::catalog::ServiceCatalog;

/// Data a template is rendered against: `{ "bluemix": <catalog document> }`.
///
/// Built fresh for every render; never shared between runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext(Value);

impl RenderContext {
    pub const CATALOG_KEY: &'static str = "bluemix";

    pub fn for_catalog(catalog: &ServiceCatalog) -> Self {
        let mut root = Map::new();
        root.insert(Self::CATALOG_KEY.to_string(), catalog.raw().clone());
        Self(Value::Object(root))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_is_nested_under_bluemix() {
        let catalog = ServiceCatalog::from_value(json!({ "backendPlatform": "SPRING" })).unwrap();
        let ctx = RenderContext::for_catalog(&catalog);
        assert_eq!(ctx.as_value()["bluemix"]["backendPlatform"], "SPRING");
    }

    #[test]
    fn catalog_is_the_only_top_level_value() {
        let catalog = ServiceCatalog::from_value(json!({ "appName": "demo" })).unwrap();
        let ctx = RenderContext::for_catalog(&catalog);
        let keys: Vec<_> = ctx.as_value().as_object().unwrap().keys().collect();
        assert_eq!(keys, vec![RenderContext::CATALOG_KEY]);
    }
}
