//! Handlebars implementation of the `TemplateRenderer` port.
//!
//! Templates produce JSON, Java and XML, so HTML escaping is disabled.
//! Strict mode turns a reference to a path missing from the catalog into a
//! rendering error instead of an empty string.

use handlebars::{Handlebars, handlebars_helper, no_escape};
use tracing::{instrument, trace};

use bindery_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::RenderContext,
    error::BinderyResult,
};

// {{json bluemix.cloudant}} renders any value as a JSON literal
handlebars_helper!(json: |value: Json| serde_json::to_string(value).unwrap_or_default());

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_helper("json", Box::new(json));
        Self { registry }
    }
}

impl Default for HandlebarsRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlebarsRenderer")
            .field("strict", &self.registry.strict_mode())
            .finish()
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip_all, fields(len = template.len()))]
    fn render_str(&self, template: &str, context: &RenderContext) -> BinderyResult<String> {
        let rendered = self
            .registry
            .render_template(template, context.as_value())
            .map_err(|e| ApplicationError::RenderingFailed {
                reason: e.to_string(),
            })?;
        trace!(len = rendered.len(), "Template rendered");
        Ok(rendered)
    }
}
