use crate::domain::{
    BuildProperty, BuildSystem, Dependency,
    ecosystem::{BuildProfile, GradleProfile, MavenProfile},
};

use super::report::Check;

/// Checks build-manifest content through the build profile's own snippets.
#[derive(Clone, Copy)]
pub struct ManifestVerifier {
    profile: &'static dyn BuildProfile,
}

pub fn build_verifier_for(build_system: BuildSystem) -> ManifestVerifier {
    match build_system {
        BuildSystem::Maven => ManifestVerifier {
            profile: &MavenProfile,
        },
        BuildSystem::Gradle => ManifestVerifier {
            profile: &GradleProfile,
        },
    }
}

impl ManifestVerifier {
    pub fn manifest_path(&self) -> &'static str {
        self.profile.manifest_path()
    }

    /// `present` selects whether the dependency must or must not appear.
    pub fn check_dependency(&self, manifest: Option<&str>, dependency: &Dependency, present: bool) -> Check {
        let verb = if present { "declares" } else { "does not declare" };
        let description = format!(
            "{} {} {} ({})",
            self.manifest_path(),
            verb,
            dependency.coordinate(),
            dependency.scope
        );
        let Some(text) = manifest else {
            return Check::fail(description, format!("{} is missing", self.manifest_path()));
        };
        let snippet = self.profile.dependency_snippet(dependency);
        Check::expect(description, text.contains(&snippet) == present, || {
            if present {
                format!("expected:\n{snippet}")
            } else {
                format!("unexpected:\n{snippet}")
            }
        })
    }

    pub fn check_property(&self, manifest: Option<&str>, property: &BuildProperty) -> Check {
        let description = format!("{} sets property {}", self.manifest_path(), property.name);
        let Some(text) = manifest else {
            return Check::fail(description, format!("{} is missing", self.manifest_path()));
        };
        let snippet = self.profile.property_snippet(property);
        Check::expect(description, text.contains(&snippet), || {
            format!("expected:\n{snippet}")
        })
    }
}
