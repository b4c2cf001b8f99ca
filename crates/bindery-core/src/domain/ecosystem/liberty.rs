use std::fmt::Write as _;

use crate::domain::{
    entities::{
        fragment::{ConfigFragment, Dependency, EnvEntry, JndiEntry},
        target::Target,
    },
    value_objects::{DependencyScope, Framework},
};

use super::{FrameworkProfile, credentials::VCAP_SERVICES_LIBERTY, line_escape, xml_escape};

/// Open Liberty: `server.xml` plus `server.env` for local development.
#[derive(Debug, Clone, Copy, Default)]
pub struct LibertyProfile;

impl FrameworkProfile for LibertyProfile {
    fn framework(&self) -> Framework {
        Framework::Liberty
    }

    fn wiring_dependencies(&self) -> Vec<Dependency> {
        vec![
            Dependency::new("javax.json", "javax.json-api", "1.0")
                .with_scope(DependencyScope::Provided),
            Dependency::new(
                "com.ibm.websphere.appserver.api",
                "com.ibm.websphere.appserver.api.json",
                "1.0.10",
            )
            .with_scope(DependencyScope::Provided),
            Dependency::new("javax.enterprise", "cdi-api", "1.2")
                .with_scope(DependencyScope::Provided),
        ]
    }

    fn wiring_features(&self) -> Vec<String> {
        vec!["jsonp-1.0".into(), "jndi-1.0".into(), "cdi-1.2".into()]
    }

    fn vcap_services_source(&self) -> &'static str {
        VCAP_SERVICES_LIBERTY
    }

    fn vcap_services_marker(&self) -> &'static str {
        "import javax.json.Json;"
    }

    fn config_path(&self) -> &'static str {
        "src/main/liberty/config/server.xml"
    }

    fn render_config(&self, target: &Target, fragment: &ConfigFragment) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            xml,
            "<server description=\"{}\">",
            xml_escape(target.project_name())
        );

        xml.push_str("    <featureManager>\n");
        for feature in &fragment.features {
            let _ = writeln!(xml, "        {}", feature_tag(feature));
        }
        xml.push_str("    </featureManager>\n\n");

        xml.push_str(
            "    <httpEndpoint id=\"defaultHttpEndpoint\" host=\"*\" httpPort=\"9080\" httpsPort=\"9443\"/>\n",
        );
        let _ = writeln!(
            xml,
            "    <webApplication location=\"{}.war\" contextRoot=\"/\"/>",
            xml_escape(target.project_name())
        );

        if !fragment.jndi_entries.is_empty() {
            xml.push('\n');
            for entry in &fragment.jndi_entries {
                let _ = writeln!(xml, "    {}", jndi_tag(entry));
            }
        }
        if !fragment.env_entries.is_empty() {
            xml.push('\n');
            for entry in &fragment.env_entries {
                let _ = writeln!(xml, "    {}", variable_tag(entry));
            }
        }

        xml.push_str("</server>\n");
        xml
    }

    fn local_dev_path(&self) -> &'static str {
        "src/main/liberty/config/server.env"
    }

    fn local_dev_line(&self, entry: &EnvEntry) -> String {
        format!("{}={}", entry.name, line_escape(&entry.value))
    }

    fn env_snippet(&self, entry: &EnvEntry) -> String {
        variable_tag(entry)
    }

    fn jndi_snippet(&self, entry: &JndiEntry) -> Option<String> {
        Some(jndi_tag(entry))
    }

    fn feature_snippet(&self, feature: &str) -> Option<String> {
        Some(feature_tag(feature))
    }
}

fn feature_tag(feature: &str) -> String {
    format!("<feature>{}</feature>", xml_escape(feature))
}

fn jndi_tag(entry: &JndiEntry) -> String {
    format!(
        "<jndiEntry jndiName=\"{}\" value=\"{}\"/>",
        xml_escape(&entry.name),
        xml_escape(&entry.value)
    )
}

fn variable_tag(entry: &EnvEntry) -> String {
    format!(
        "<variable name=\"{}\" value=\"{}\"/>",
        xml_escape(&entry.name),
        xml_escape(&entry.value)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target::builder().project_name("orders").build().unwrap()
    }

    #[test]
    fn server_xml_carries_features_jndi_and_variables() {
        let fragment = ConfigFragment {
            features: vec!["jdbc-4.1".into()],
            jndi_entries: vec![JndiEntry::new("jdbc/url", "\"jdbc:db2://h\"")],
            env_entries: vec![EnvEntry::new("DB_USER", "a&b")],
            ..Default::default()
        };
        let xml = LibertyProfile.render_config(&target(), &fragment);

        assert!(xml.contains("<feature>jdbc-4.1</feature>"));
        assert!(xml.contains(&LibertyProfile.jndi_snippet(&fragment.jndi_entries[0]).unwrap()));
        assert!(xml.contains("<variable name=\"DB_USER\" value=\"a&amp;b\"/>"));
        assert!(xml.contains("location=\"orders.war\""));
    }

    #[test]
    fn server_env_has_one_line_per_entry() {
        let entries = [
            EnvEntry::new("dashdb_dsn", "DATABASE=BLUDB"),
            EnvEntry::new("dashdb_ssljdbcurl", "jdbc:db2://h:50001/BLUDB"),
        ];
        let env = LibertyProfile.render_local_dev(&entries);
        assert_eq!(
            env,
            "dashdb_dsn=DATABASE=BLUDB\ndashdb_ssljdbcurl=jdbc:db2://h:50001/BLUDB\n"
        );
    }

    #[test]
    fn server_env_values_cannot_add_lines() {
        let entries = [
            EnvEntry::new("dashdb_dsn", "DATABASE=X\nINJECTED=1"),
            EnvEntry::new("dashdb_ssljdbcurl", "jdbc:x"),
        ];
        let env = LibertyProfile.render_local_dev(&entries);
        assert_eq!(env.lines().count(), 2);
        assert!(env.starts_with("dashdb_dsn=DATABASE=X\\nINJECTED=1\n"));
    }

    #[test]
    fn wiring_uses_provided_scope() {
        assert!(
            LibertyProfile
                .wiring_dependencies()
                .iter()
                .all(|d| d.scope == DependencyScope::Provided)
        );
    }
}
