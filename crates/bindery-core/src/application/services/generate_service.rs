//! Generate Service - main application orchestrator.
//!
//! This service coordinates the whole generation workflow:
//! 1. Validate the target
//! 2. Resolve requested services against the store and the catalog
//! 3. Render each service's config fragment and template files
//! 4. Add credential wiring, framework config, build manifest and mappings
//! 5. Write to filesystem, rolling back on failure
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ServiceStore, TemplateRenderer},
    },
    domain::{
        ConfigFragment, DomainError, DomainValidator as validator, EnvEntry, Framework,
        ProjectStructure, RelativePath, RenderContext, ServiceCatalog, ServiceDescriptor,
        ServiceKey, Target, TemplateContent,
        ecosystem::{
            MAPPINGS_PATH, build_profile, credential_sources, framework_profile, wiring_fragment,
        },
    },
    error::{BinderyResult, Context},
};

// ── Request / report DTOs ─────────────────────────────────────────────────────

/// Input of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub target: Target,
    /// Project root; created by the run.
    pub output_dir: PathBuf,
    /// Services to bind. Empty means every catalog instance that has a
    /// definition for the target framework.
    pub services: Vec<ServiceKey>,
    /// Replace an existing project directory.
    pub overwrite: bool,
}

impl GenerationRequest {
    pub fn new(target: Target, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            target,
            output_dir: output_dir.into(),
            services: Vec::new(),
            overwrite: false,
        }
    }

    pub fn with_service(mut self, key: impl Into<ServiceKey>) -> Self {
        self.services.push(key.into());
        self
    }

    pub fn with_services<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<ServiceKey>,
    {
        self.services.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

/// Everything a run would write, computed without touching the filesystem.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub structure: ProjectStructure,
    pub services: Vec<ServiceKey>,
    /// Whether credential sources and their dependencies were added.
    pub wiring: bool,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub root: PathBuf,
    pub files: Vec<RelativePath>,
    pub services: Vec<ServiceKey>,
    pub wiring: bool,
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Main generation service.
pub struct GenerateService {
    store: Box<dyn ServiceStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use bindery_core::application::{GenerateService, ports::*};
    ///
    /// # fn demo(store: Box<dyn ServiceStore>, renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) {
    /// let service = GenerateService::new(
    ///     store,      // impl ServiceStore
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    /// );
    /// # }
    /// ```
    pub fn new(
        store: Box<dyn ServiceStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    pub fn store(&self) -> &dyn ServiceStore {
        self.store.as_ref()
    }

    pub fn renderer(&self) -> &dyn TemplateRenderer {
        self.renderer.as_ref()
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem.as_ref()
    }

    /// Generate and write a project.
    #[instrument(
        skip_all,
        fields(
            target = %request.target,
            output_path = %request.output_dir.display()
        )
    )]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        catalog: &ServiceCatalog,
    ) -> BinderyResult<GenerationReport> {
        let run_id = Uuid::new_v4();
        info!(%run_id, "Generating project");

        let plan = self.plan(request, catalog)?;

        self.write_structure(&plan.structure, request.overwrite)?;

        info!(
            files = plan.structure.entry_count(),
            wiring = plan.wiring,
            "Generation completed successfully"
        );

        Ok(GenerationReport {
            run_id,
            root: plan.structure.root().to_path_buf(),
            files: plan.structure.files().map(|f| f.path.clone()).collect(),
            services: plan.services,
            wiring: plan.wiring,
        })
    }

    /// Compute every file a run would write. Nothing touches the filesystem,
    /// so a missing template set or bad config fails before any write.
    #[instrument(skip_all, fields(target = %request.target))]
    pub fn plan(
        &self,
        request: &GenerationRequest,
        catalog: &ServiceCatalog,
    ) -> BinderyResult<GenerationPlan> {
        // 1. Validate target
        validator::validate_target(&request.target)?;
        let target = &request.target;
        let framework = target.framework();

        // 2. Resolve services
        let descriptors = self.resolve_services(request, catalog)?;

        // 3. Fail fast on a missing template set
        if let Some(missing) = descriptors
            .iter()
            .find(|d| d.templates_for(framework).is_none())
        {
            return Err(DomainError::MissingTemplate {
                service: missing.location().to_string(),
                framework: framework.template_dir().to_string(),
            }
            .into());
        }

        let context = RenderContext::for_catalog(catalog);
        let mut structure = ProjectStructure::new(&request.output_dir);
        let mut local_dev: Vec<EnvEntry> = Vec::new();

        // Wiring goes in first: on a shared coordinate its scope wins
        let profile = framework_profile(framework);
        let wiring = descriptors
            .iter()
            .any(|d| d.instrumentation_for(framework).is_some());
        let mut fragment = if wiring {
            wiring_fragment(framework)
        } else {
            ConfigFragment::default()
        };

        // 4-5. Config fragments and template files
        for descriptor in &descriptors {
            let Some(set) = descriptor.templates_for(framework) else {
                continue;
            };

            let rendered = self.renderer.render_str(set.config_source(), &context)?;
            let part =
                ConfigFragment::parse(&rendered, descriptor.location(), framework.template_dir())?;
            debug!(
                service = %descriptor.key(),
                dependencies = part.dependencies.len(),
                env_entries = part.env_entries.len(),
                "Config fragment rendered"
            );
            fragment.merge(part);

            for file in set.files() {
                let content = match &file.content {
                    TemplateContent::Literal(text) => text.clone(),
                    TemplateContent::Parameterized(text) => {
                        self.renderer.render_str(text, &context)?
                    }
                };
                structure.add_file(file.path.clone(), content);
            }

            local_dev.extend(descriptor.local_dev().iter().cloned());
        }

        // 6. Credential sources
        if wiring {
            for source in credential_sources(framework) {
                structure.add_file(source.path(), source.content);
            }
        }

        if framework == Framework::Spring
            && (!fragment.jndi_entries.is_empty() || !fragment.features.is_empty())
        {
            warn!(
                jndi_entries = fragment.jndi_entries.len(),
                features = fragment.features.len(),
                "Spring has no JNDI or feature configuration; entries ignored"
            );
        }

        // 7. Framework config and build manifest
        structure.add_file(
            RelativePath::try_new(profile.config_path())?,
            profile.render_config(target, &fragment),
        );
        structure.add_file(
            RelativePath::try_new(profile.local_dev_path())?,
            profile.render_local_dev(&local_dev),
        );

        let build = build_profile(target.build_system());
        structure.add_file(
            RelativePath::try_new(build.manifest_path())?,
            build.render_manifest(target, &fragment.dependencies, &fragment.properties),
        );

        // 8. Credential mappings
        structure.add_file(
            RelativePath::try_new(MAPPINGS_PATH)?,
            render_mappings(&descriptors)?,
        );

        validator::validate_project_structure(&structure)?;

        Ok(GenerationPlan {
            structure,
            services: descriptors.iter().map(|d| d.key().clone()).collect(),
            wiring,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn resolve_services(
        &self,
        request: &GenerationRequest,
        catalog: &ServiceCatalog,
    ) -> BinderyResult<Vec<ServiceDescriptor>> {
        let framework = request.target.framework();

        let keys: Vec<ServiceKey> = if request.services.is_empty() {
            self.bindable_services(catalog, framework)?
        } else {
            let mut seen = HashSet::new();
            request
                .services
                .iter()
                .filter(|k| seen.insert(*k))
                .cloned()
                .collect()
        };

        keys.iter()
            .map(|key| -> BinderyResult<ServiceDescriptor> {
                let definition = self.store.get(key)?;
                Ok(ServiceDescriptor::resolve(&definition, catalog)?)
            })
            .collect()
    }

    /// Catalog instances that have a definition for `framework`, in
    /// catalog order.
    pub fn bindable_services(
        &self,
        catalog: &ServiceCatalog,
        framework: Framework,
    ) -> BinderyResult<Vec<ServiceKey>> {
        let definitions = self.store.list()?;
        let mut keys = Vec::new();
        for key in catalog.keys() {
            match definitions.iter().find(|d| d.key() == key) {
                Some(d) if d.supports(framework) => keys.push(key.clone()),
                Some(d) => {
                    warn!(service = %d.location(), %framework, "No templates for framework, skipping")
                }
                None => debug!(%key, "Catalog entry has no service definition"),
            }
        }
        Ok(keys)
    }

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure, overwrite: bool) -> BinderyResult<()> {
        let root = structure.root();

        if self.filesystem.exists(root) {
            if !overwrite {
                return Err(ApplicationError::ProjectExists {
                    path: root.to_path_buf(),
                }
                .into());
            }
            warn!(path = %root.display(), "Overwriting existing project");
            self.filesystem.remove_dir_all(root)?;
        }

        match self.write_all(structure) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(root);
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> BinderyResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for dir in structure.directories() {
            self.filesystem.create_dir_all(&dir.under(root))?;
        }
        for file in structure.files() {
            self.filesystem
                .write_file(&file.path.under(root), &file.content)?;
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

/// `mappings.json`: env name → credential search patterns.
fn render_mappings(descriptors: &[ServiceDescriptor]) -> BinderyResult<String> {
    let mut mappings = Map::new();
    for descriptor in descriptors {
        for (name, patterns) in descriptor.search_patterns() {
            mappings.insert(name, json!({ "searchPatterns": patterns }));
        }
    }
    let mut text =
        serde_json::to_string_pretty(&Value::Object(mappings)).context("serializing mappings")?;
    text.push('\n');
    Ok(text)
}
