use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::services::{GenerateService, GenerationRequest},
    domain::{
        BuildSystem, ConfigFragment, DomainError, Framework, RenderContext, ServiceCatalog,
        ServiceDefinition, ServiceDescriptor, ServiceKey, Target,
        ecosystem::{LEGACY_LOCALDEV_PATH, MAPPINGS_PATH, wiring_fragment},
    },
    error::BinderyResult,
};

use super::{
    framework::{GeneratedFiles, verifier_for},
    manifest::build_verifier_for,
    report::{Check, VerificationReport},
};

/// Wall-clock budget of one case.
pub const DEFAULT_BUDGET: Duration = Duration::from_secs(10);

/// Project name used for every generated verification project.
pub const VERIFY_PROJECT_NAME: &str = "app";

/// One (service, framework, build system) combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationCase {
    pub service: ServiceKey,
    pub framework: Framework,
    pub build_system: BuildSystem,
    pub budget: Duration,
}

impl VerificationCase {
    pub fn new(service: impl Into<ServiceKey>, framework: Framework, build_system: BuildSystem) -> Self {
        Self {
            service: service.into(),
            framework,
            build_system,
            budget: DEFAULT_BUDGET,
        }
    }

    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }
}

impl fmt::Display for VerificationCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.framework, self.build_system, self.service)
    }
}

/// Generates projects and checks them against independently rendered
/// expectations.
pub struct VerificationHarness {
    generator: GenerateService,
    catalog: ServiceCatalog,
}

impl VerificationHarness {
    pub fn new(generator: GenerateService, catalog: ServiceCatalog) -> Self {
        Self { generator, catalog }
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn generator(&self) -> &GenerateService {
        &self.generator
    }

    /// Every bound definition × framework × build system, optionally
    /// filtered. Ordered by build system, then framework, then store order.
    pub fn cases(
        &self,
        framework: Option<Framework>,
        build_system: Option<BuildSystem>,
        service: Option<&ServiceKey>,
    ) -> BinderyResult<Vec<VerificationCase>> {
        let mut cases = Vec::new();
        for bs in BuildSystem::ALL {
            if build_system.is_some_and(|b| b != bs) {
                continue;
            }
            for fw in Framework::ALL {
                if framework.is_some_and(|f| f != fw) {
                    continue;
                }
                for definition in self.generator.store().for_framework(fw)? {
                    if service.is_some_and(|s| s != definition.key()) {
                        continue;
                    }
                    if !self.catalog.contains(definition.key()) {
                        warn!(service = %definition.location(), "Not bound in catalog, skipping");
                        continue;
                    }
                    cases.push(VerificationCase::new(definition.key().clone(), fw, bs));
                }
            }
        }
        debug!(count = cases.len(), "Verification cases collected");
        Ok(cases)
    }

    /// Run one case, generating into `output_dir`.
    ///
    /// Errors are reserved for cases that cannot start (unknown or unbound
    /// service). Everything else is reported as a check.
    #[instrument(skip_all, fields(case = %case))]
    pub fn verify(
        &self,
        case: &VerificationCase,
        output_dir: &Path,
    ) -> BinderyResult<VerificationReport> {
        let started = Instant::now();
        let mut report = VerificationReport::new(case.clone());

        let definition = self.generator.store().get(&case.service)?;
        let descriptor = ServiceDescriptor::resolve(&definition, &self.catalog)?;

        let target = Target::builder()
            .project_name(VERIFY_PROJECT_NAME)
            .framework(case.framework)
            .build_system(case.build_system)
            .build()?;
        let root = output_dir.join(VERIFY_PROJECT_NAME);
        let request = GenerationRequest::new(target, &root)
            .with_service(case.service.clone())
            .overwrite(true);

        if let Err(e) = self.generator.generate(&request, &self.catalog) {
            report.push(Check::fail("project generated", e.to_string()));
            report.elapsed = started.elapsed();
            return Ok(report);
        }
        report.push(Check::pass("project generated"));

        let declared = descriptor.instrumentation_for(case.framework);
        let expected = match self.expected_config(&definition, case.framework, declared.is_some()) {
            Ok(fragment) => fragment,
            Err(e) => {
                report.push(Check::fail("config.json.template re-renders", e.to_string()));
                report.elapsed = started.elapsed();
                return Ok(report);
            }
        };

        let files = GeneratedFiles::new(&root, self.generator.filesystem());
        let verifier = verifier_for(case.framework);
        let manifest = build_verifier_for(case.build_system);

        // Build manifest carries the config's dependencies and properties
        let manifest_text = files.read(manifest.manifest_path());
        for dependency in &expected.dependencies {
            report.push(manifest.check_dependency(manifest_text.as_deref(), dependency, true));
        }
        for property in &expected.properties {
            report.push(manifest.check_property(manifest_text.as_deref(), property));
        }

        verifier.check_entries(&files, &expected, &mut report);
        verifier.check_local_dev(&files, &descriptor, &mut report);

        for file in declared.unwrap_or_default() {
            report.push(Check::expect(
                format!("instrumentation {file} exists"),
                files.exists(file.as_str()),
                || format!("declared by {}", definition.location()),
            ));
        }
        verifier.check_wiring(&files, &manifest, declared.is_some(), &mut report);

        report.push(Check::expect(
            format!("{MAPPINGS_PATH} exists"),
            files.exists(MAPPINGS_PATH),
            || "mappings file not generated".into(),
        ));
        report.push(Check::expect(
            format!("{LEGACY_LOCALDEV_PATH} does not exist"),
            !files.exists(LEGACY_LOCALDEV_PATH),
            || "legacy local-dev file generated".into(),
        ));

        let elapsed = started.elapsed();
        report.push(Check::expect(
            format!("finished within {:?}", case.budget),
            elapsed <= case.budget,
            || format!("took {elapsed:?}"),
        ));
        report.elapsed = elapsed;

        info!(
            passed = report.passed(),
            checks = report.checks.len(),
            failures = report.failure_count(),
            "Case verified"
        );
        Ok(report)
    }

    /// Render the service's config template straight from its source,
    /// behind the wiring fragment when the service is instrumented.
    fn expected_config(
        &self,
        definition: &ServiceDefinition,
        framework: Framework,
        wired: bool,
    ) -> BinderyResult<ConfigFragment> {
        let set = definition
            .templates_for(framework)
            .ok_or_else(|| DomainError::MissingTemplate {
                service: definition.location().to_string(),
                framework: framework.template_dir().to_string(),
            })?;
        let context = RenderContext::for_catalog(&self.catalog);
        let rendered = self
            .generator
            .renderer()
            .render_str(set.config_source(), &context)?;
        let own = ConfigFragment::parse(&rendered, definition.location(), framework.template_dir())?;
        if !wired {
            return Ok(own);
        }
        let mut fragment = wiring_fragment(framework);
        fragment.merge(own);
        Ok(fragment)
    }
}
