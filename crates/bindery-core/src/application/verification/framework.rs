use std::path::{Path, PathBuf};

use crate::{
    application::ports::Filesystem,
    domain::{
        ConfigFragment, Framework, ServiceDescriptor,
        ecosystem::{
            FrameworkProfile, LibertyProfile, SpringProfile, credential_sources, vcap_services,
        },
    },
};

use super::{
    manifest::ManifestVerifier,
    report::{Check, VerificationReport},
};

/// Read access to a generated project tree.
pub struct GeneratedFiles<'a> {
    root: PathBuf,
    filesystem: &'a dyn Filesystem,
}

impl<'a> GeneratedFiles<'a> {
    pub fn new(root: impl Into<PathBuf>, filesystem: &'a dyn Filesystem) -> Self {
        Self {
            root: root.into(),
            filesystem,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.filesystem.exists(&self.root.join(relative))
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        self.filesystem.read_to_string(&self.root.join(relative)).ok()
    }
}

/// Framework-specific checks. The provided methods cover what every
/// framework shares; implementors add how entries are recognised.
pub trait FrameworkVerifier: Send + Sync {
    fn profile(&self) -> &'static dyn FrameworkProfile;

    /// Env and JNDI entries of the rendered config appear in the framework
    /// configuration.
    fn check_entries(
        &self,
        files: &GeneratedFiles<'_>,
        expected: &ConfigFragment,
        report: &mut VerificationReport,
    );

    /// The local-dev sink holds exactly the service's local-dev entries.
    fn check_local_dev(
        &self,
        files: &GeneratedFiles<'_>,
        descriptor: &ServiceDescriptor,
        report: &mut VerificationReport,
    ) {
        let profile = self.profile();
        let path = profile.local_dev_path();
        let description = format!("{path} holds exactly the local-dev entries");

        let Some(text) = files.read(path) else {
            report.push(Check::fail(description, format!("{path} is missing")));
            return;
        };

        let mut expected: Vec<String> = descriptor
            .local_dev()
            .iter()
            .map(|e| profile.local_dev_line(e))
            .collect();
        let mut actual: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect();
        expected.sort();
        actual.sort();

        report.push(Check::expect(description, expected == actual, || {
            format!("expected {expected:?}, found {actual:?}")
        }));
    }

    /// Credential sources, wiring dependencies and features exist iff
    /// `wired`.
    fn check_wiring(
        &self,
        files: &GeneratedFiles<'_>,
        manifest: &ManifestVerifier,
        wired: bool,
        report: &mut VerificationReport,
    ) {
        let profile = self.profile();
        let verb = if wired { "exists" } else { "is absent" };

        for source in credential_sources(profile.framework()) {
            let path = source.path();
            report.push(Check::expect(
                format!("{path} {verb}"),
                files.exists(path.as_str()) == wired,
                || format!("wiring expected: {wired}"),
            ));
        }

        if wired {
            let path = vcap_services(profile.framework()).path();
            let marker = profile.vcap_services_marker();
            let found = files
                .read(path.as_str())
                .is_some_and(|text| text.contains(marker));
            report.push(Check::expect(
                format!("{path} contains '{marker}'"),
                found,
                || "wrong VCAPServices variant".into(),
            ));
        }

        let manifest_text = files.read(manifest.manifest_path());
        for dependency in profile.wiring_dependencies() {
            report.push(manifest.check_dependency(manifest_text.as_deref(), &dependency, wired));
        }

        let config = files.read(profile.config_path()).unwrap_or_default();
        for feature in profile.wiring_features() {
            if let Some(snippet) = profile.feature_snippet(&feature) {
                report.push(Check::expect(
                    format!("feature {feature} {verb}"),
                    config.contains(&snippet) == wired,
                    || format!("checked {}", profile.config_path()),
                ));
            }
        }
    }
}

pub struct LibertyVerifier;

pub struct SpringVerifier;

pub fn verifier_for(framework: Framework) -> &'static dyn FrameworkVerifier {
    match framework {
        Framework::Liberty => &LibertyVerifier,
        Framework::Spring => &SpringVerifier,
    }
}

impl FrameworkVerifier for LibertyVerifier {
    fn profile(&self) -> &'static dyn FrameworkProfile {
        &LibertyProfile
    }

    fn check_entries(
        &self,
        files: &GeneratedFiles<'_>,
        expected: &ConfigFragment,
        report: &mut VerificationReport,
    ) {
        let path = self.profile().config_path();
        let config = files.read(path);
        let contains = |snippet: &str| config.as_deref().is_some_and(|c| c.contains(snippet));

        for entry in &expected.jndi_entries {
            if let Some(snippet) = self.profile().jndi_snippet(entry) {
                report.push(Check::expect(
                    format!("{path} binds JNDI {}", entry.name),
                    contains(&snippet),
                    || format!("expected {snippet}"),
                ));
            }
        }
        for entry in &expected.env_entries {
            let snippet = self.profile().env_snippet(entry);
            report.push(Check::expect(
                format!("{path} defines variable {}", entry.name),
                contains(&snippet),
                || format!("expected {snippet}"),
            ));
        }
        for feature in &expected.features {
            if let Some(snippet) = self.profile().feature_snippet(feature) {
                report.push(Check::expect(
                    format!("{path} enables feature {feature}"),
                    contains(&snippet),
                    || format!("expected {snippet}"),
                ));
            }
        }
    }
}

impl FrameworkVerifier for SpringVerifier {
    fn profile(&self) -> &'static dyn FrameworkProfile {
        &SpringProfile
    }

    // Spring has no JNDI; only env entries are checked.
    fn check_entries(
        &self,
        files: &GeneratedFiles<'_>,
        expected: &ConfigFragment,
        report: &mut VerificationReport,
    ) {
        let path = self.profile().config_path();
        let config = files.read(path);

        for entry in &expected.env_entries {
            let snippet = self.profile().env_snippet(entry);
            let found = config
                .as_deref()
                .is_some_and(|c| c.lines().any(|l| l == snippet));
            report.push(Check::expect(
                format!("{path} sets {}", entry.name),
                found,
                || format!("expected line {snippet}"),
            ));
        }
    }
}
