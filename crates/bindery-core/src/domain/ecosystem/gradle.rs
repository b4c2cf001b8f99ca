use std::fmt::Write as _;

use crate::domain::{
    entities::{
        fragment::{BuildProperty, Dependency},
        target::Target,
    },
    value_objects::{BuildSystem, DependencyScope, Framework},
};

use super::BuildProfile;

#[derive(Debug, Clone, Copy, Default)]
pub struct GradleProfile;

impl BuildProfile for GradleProfile {
    fn build_system(&self) -> BuildSystem {
        BuildSystem::Gradle
    }

    fn render_manifest(
        &self,
        target: &Target,
        dependencies: &[Dependency],
        properties: &[BuildProperty],
    ) -> String {
        let mut gradle = String::new();

        match target.framework() {
            Framework::Liberty => {
                gradle.push_str("apply plugin: 'war'\napply plugin: 'liberty'\n\n");
            }
            Framework::Spring => {
                gradle.push_str(
                    "apply plugin: 'java'\napply plugin: 'org.springframework.boot'\n\
                     apply plugin: 'io.spring.dependency-management'\n\n",
                );
            }
        }

        gradle.push_str("group = 'application'\n");
        gradle.push_str("version = '1.0-SNAPSHOT'\n");
        let _ = writeln!(gradle, "description = '{}'\n", quote(target.project_name()));
        gradle.push_str("sourceCompatibility = 1.8\ntargetCompatibility = 1.8\n\n");

        gradle.push_str("ext {\n");
        for property in properties {
            gradle.push_str(&self.property_snippet(property));
            gradle.push('\n');
        }
        gradle.push_str("}\n\n");

        gradle.push_str("repositories {\n    mavenCentral()\n}\n\n");

        gradle.push_str("dependencies {\n");
        if target.framework() == Framework::Spring {
            gradle.push_str("    compile group: 'org.springframework.boot', name: 'spring-boot-starter-web'\n");
        }
        for dependency in dependencies {
            gradle.push_str(&self.dependency_snippet(dependency));
            gradle.push('\n');
        }
        gradle.push_str("}\n");
        gradle
    }

    fn dependency_snippet(&self, dependency: &Dependency) -> String {
        let mut coords = format!(
            "group: '{}', name: '{}'",
            quote(&dependency.group_id),
            quote(&dependency.artifact_id)
        );
        if let Some(version) = &dependency.version {
            let _ = write!(coords, ", version: '{}'", quote(version));
        }

        let configuration = configuration(dependency.scope);
        if dependency.exclusions.is_empty() {
            return format!("    {configuration} {coords}");
        }

        let mut out = format!("    {configuration}({coords}) {{\n");
        for exclusion in &dependency.exclusions {
            let _ = writeln!(
                out,
                "        exclude group: '{}', module: '{}'",
                quote(&exclusion.group_id),
                quote(&exclusion.artifact_id)
            );
        }
        out.push_str("    }");
        out
    }

    fn property_snippet(&self, property: &BuildProperty) -> String {
        format!(
            "    set('{}', '{}')",
            quote(&property.name),
            quote(&property.value)
        )
    }
}

fn configuration(scope: DependencyScope) -> &'static str {
    match scope {
        DependencyScope::Compile => "compile",
        DependencyScope::Provided => "providedCompile",
        DependencyScope::Runtime => "runtime",
        DependencyScope::Test => "testCompile",
    }
}

fn quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
