use std::fmt::Write as _;

use crate::domain::{
    entities::{
        fragment::{ConfigFragment, Dependency, EnvEntry, JndiEntry},
        target::Target,
    },
    value_objects::Framework,
};

use super::{FrameworkProfile, credentials::VCAP_SERVICES_SPRING, line_escape};

/// Spring Boot: `application.properties` plus the `local` profile file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpringProfile;

impl FrameworkProfile for SpringProfile {
    fn framework(&self) -> Framework {
        Framework::Spring
    }

    // Jackson ships with spring-boot-starter-web.
    fn wiring_dependencies(&self) -> Vec<Dependency> {
        Vec::new()
    }

    fn wiring_features(&self) -> Vec<String> {
        Vec::new()
    }

    fn vcap_services_source(&self) -> &'static str {
        VCAP_SERVICES_SPRING
    }

    fn vcap_services_marker(&self) -> &'static str {
        "import com.fasterxml.jackson.databind.JsonNode;"
    }

    fn config_path(&self) -> &'static str {
        "src/main/resources/application.properties"
    }

    fn render_config(&self, target: &Target, fragment: &ConfigFragment) -> String {
        let mut props = String::new();
        let _ = writeln!(props, "spring.application.name={}", target.project_name());
        for entry in &fragment.env_entries {
            props.push_str(&property_line(entry));
            props.push('\n');
        }
        props
    }

    fn local_dev_path(&self) -> &'static str {
        "src/main/resources/application-local.properties"
    }

    fn local_dev_line(&self, entry: &EnvEntry) -> String {
        property_line(entry)
    }

    fn env_snippet(&self, entry: &EnvEntry) -> String {
        property_line(entry)
    }

    fn jndi_snippet(&self, _entry: &JndiEntry) -> Option<String> {
        None
    }

    fn feature_snippet(&self, _feature: &str) -> Option<String> {
        None
    }
}

fn property_line(entry: &EnvEntry) -> String {
    format!("{}={}", entry.name, line_escape(&entry.value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_properties_lists_env_entries() {
        let target = Target::builder()
            .project_name("nlc-demo")
            .framework(Framework::Spring)
            .build()
            .unwrap();
        let fragment = ConfigFragment {
            env_entries: vec![EnvEntry::new("watson.url", "https://gateway")],
            ..Default::default()
        };
        let props = SpringProfile.render_config(&target, &fragment);
        assert!(props.starts_with("spring.application.name=nlc-demo\n"));
        assert!(props.contains("watson.url=https://gateway\n"));
    }

    #[test]
    fn backslashes_are_escaped() {
        let line = SpringProfile.local_dev_line(&EnvEntry::new("path", r"C:\db"));
        assert_eq!(line, r"path=C:\\db");
    }

    #[test]
    fn no_jndi_or_features() {
        assert!(SpringProfile.jndi_snippet(&JndiEntry::new("a", "b")).is_none());
        assert!(SpringProfile.feature_snippet("cdi-1.2").is_none());
    }
}
