//! Per-framework and per-build-system output rules.
//!
//! Every variant of [`Framework`] and [`BuildSystem`] maps to exactly one
//! profile through a closed `match`. The generator uses a profile to render
//! files; the verification harness uses the same profile to locate and
//! recognise what was rendered.

mod credentials;
mod gradle;
mod liberty;
mod maven;
mod spring;

pub use credentials::{
    CREDENTIALS_PACKAGE_DIR, CredentialSource, VCAP_SERVICES_FILE, credential_sources, vcap_services,
};
pub use gradle::GradleProfile;
pub use liberty::LibertyProfile;
pub use maven::MavenProfile;
pub use spring::SpringProfile;

use crate::domain::{
    entities::{
        fragment::{BuildProperty, ConfigFragment, Dependency, EnvEntry, JndiEntry},
        target::Target,
    },
    value_objects::{BuildSystem, Framework},
};

/// Output path of the credential search-pattern mappings.
pub const MAPPINGS_PATH: &str = "src/main/resources/mappings.json";

/// Root-level file older generators wrote instead of `mappings.json`.
pub const LEGACY_LOCALDEV_PATH: &str = "localdev-config.json";

/// Framework-specific output rules.
pub trait FrameworkProfile: Send + Sync {
    fn framework(&self) -> Framework;

    /// Dependencies required by the credential sources.
    fn wiring_dependencies(&self) -> Vec<Dependency>;

    /// Runtime features required by the credential sources.
    fn wiring_features(&self) -> Vec<String>;

    /// Source of this framework's `VCAPServices.java`.
    fn vcap_services_source(&self) -> &'static str;

    /// Line that identifies this framework's `VCAPServices.java` variant.
    fn vcap_services_marker(&self) -> &'static str;

    /// Main configuration file path.
    fn config_path(&self) -> &'static str;

    /// Render the main configuration file.
    fn render_config(&self, target: &Target, fragment: &ConfigFragment) -> String;

    /// Local-development sink path.
    fn local_dev_path(&self) -> &'static str;

    fn local_dev_line(&self, entry: &EnvEntry) -> String;

    /// Render the local-development sink: exactly one line per entry.
    fn render_local_dev(&self, entries: &[EnvEntry]) -> String {
        let mut out = String::new();
        for entry in entries {
            out.push_str(&self.local_dev_line(entry));
            out.push('\n');
        }
        out
    }

    fn env_snippet(&self, entry: &EnvEntry) -> String;

    /// `None` when the framework has no JNDI configuration.
    fn jndi_snippet(&self, entry: &JndiEntry) -> Option<String>;

    /// `None` when the framework has no feature manager.
    fn feature_snippet(&self, feature: &str) -> Option<String>;
}

/// Build-system-specific output rules.
pub trait BuildProfile: Send + Sync {
    fn build_system(&self) -> BuildSystem;

    fn manifest_path(&self) -> &'static str {
        self.build_system().manifest_file()
    }

    fn render_manifest(
        &self,
        target: &Target,
        dependencies: &[Dependency],
        properties: &[BuildProperty],
    ) -> String;

    /// Exact text a dependency occupies in the manifest.
    fn dependency_snippet(&self, dependency: &Dependency) -> String;

    /// Exact text a property occupies in the manifest.
    fn property_snippet(&self, property: &BuildProperty) -> String;
}

pub fn framework_profile(framework: Framework) -> &'static dyn FrameworkProfile {
    match framework {
        Framework::Liberty => &LibertyProfile,
        Framework::Spring => &SpringProfile,
    }
}

/// Dependencies and features the credential sources need. Merged ahead of
/// every service fragment so a service cannot change their scope.
pub fn wiring_fragment(framework: Framework) -> ConfigFragment {
    let profile = framework_profile(framework);
    ConfigFragment {
        dependencies: profile.wiring_dependencies(),
        features: profile.wiring_features(),
        ..Default::default()
    }
}

pub fn build_profile(build_system: BuildSystem) -> &'static dyn BuildProfile {
    match build_system {
        BuildSystem::Maven => &MavenProfile,
        BuildSystem::Gradle => &GradleProfile,
    }
}

/// Escape a value for a `name=value` line so it stays on one line.
pub(crate) fn line_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

pub(crate) fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
