use std::fmt::Write as _;

use crate::domain::{
    entities::{
        fragment::{BuildProperty, Dependency},
        target::Target,
    },
    value_objects::{BuildSystem, Framework},
};

use super::{BuildProfile, xml_escape};

const SPRING_BOOT_VERSION: &str = "2.7.18";
const LIBERTY_PLUGIN_VERSION: &str = "3.10";

#[derive(Debug, Clone, Copy, Default)]
pub struct MavenProfile;

impl BuildProfile for MavenProfile {
    fn build_system(&self) -> BuildSystem {
        BuildSystem::Maven
    }

    fn render_manifest(
        &self,
        target: &Target,
        dependencies: &[Dependency],
        properties: &[BuildProperty],
    ) -> String {
        let name = xml_escape(target.project_name());
        let mut pom = String::new();

        pom.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        pom.push_str(
            "<project xmlns=\"http://maven.apache.org/POM/4.0.0\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xsi:schemaLocation=\"http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd\">\n",
        );
        pom.push_str("    <modelVersion>4.0.0</modelVersion>\n\n");

        if target.framework() == Framework::Spring {
            let _ = write!(
                pom,
                "    <parent>\n        <groupId>org.springframework.boot</groupId>\n        \
                 <artifactId>spring-boot-starter-parent</artifactId>\n        \
                 <version>{SPRING_BOOT_VERSION}</version>\n    </parent>\n\n"
            );
        }

        pom.push_str("    <groupId>application</groupId>\n");
        let _ = writeln!(pom, "    <artifactId>{name}</artifactId>");
        pom.push_str("    <version>1.0-SNAPSHOT</version>\n");
        let packaging = match target.framework() {
            Framework::Liberty => "war",
            Framework::Spring => "jar",
        };
        let _ = writeln!(pom, "    <packaging>{packaging}</packaging>\n");

        pom.push_str("    <properties>\n");
        pom.push_str("        <maven.compiler.source>1.8</maven.compiler.source>\n");
        pom.push_str("        <maven.compiler.target>1.8</maven.compiler.target>\n");
        pom.push_str("        <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>\n");
        for property in properties {
            pom.push_str(&self.property_snippet(property));
            pom.push('\n');
        }
        pom.push_str("    </properties>\n\n");

        pom.push_str("    <dependencies>\n");
        if target.framework() == Framework::Spring {
            pom.push_str(
                "        <dependency>\n            <groupId>org.springframework.boot</groupId>\n            \
                 <artifactId>spring-boot-starter-web</artifactId>\n        </dependency>\n",
            );
        }
        for dependency in dependencies {
            pom.push_str(&self.dependency_snippet(dependency));
            pom.push('\n');
        }
        pom.push_str("    </dependencies>\n\n");

        pom.push_str("    <build>\n        <plugins>\n");
        match target.framework() {
            Framework::Liberty => {
                let _ = write!(
                    pom,
                    "            <plugin>\n                <groupId>io.openliberty.tools</groupId>\n                \
                     <artifactId>liberty-maven-plugin</artifactId>\n                \
                     <version>{LIBERTY_PLUGIN_VERSION}</version>\n            </plugin>\n"
                );
            }
            Framework::Spring => {
                pom.push_str(
                    "            <plugin>\n                <groupId>org.springframework.boot</groupId>\n                \
                     <artifactId>spring-boot-maven-plugin</artifactId>\n            </plugin>\n",
                );
            }
        }
        pom.push_str("        </plugins>\n    </build>\n</project>\n");
        pom
    }

    fn dependency_snippet(&self, dependency: &Dependency) -> String {
        let mut xml = String::from("        <dependency>\n");
        let _ = writeln!(
            xml,
            "            <groupId>{}</groupId>",
            xml_escape(&dependency.group_id)
        );
        let _ = writeln!(
            xml,
            "            <artifactId>{}</artifactId>",
            xml_escape(&dependency.artifact_id)
        );
        if let Some(version) = &dependency.version {
            let _ = writeln!(xml, "            <version>{}</version>", xml_escape(version));
        }
        let _ = writeln!(xml, "            <scope>{}</scope>", dependency.scope);
        if !dependency.exclusions.is_empty() {
            xml.push_str("            <exclusions>\n");
            for exclusion in &dependency.exclusions {
                let _ = write!(
                    xml,
                    "                <exclusion>\n                    <groupId>{}</groupId>\n                    \
                     <artifactId>{}</artifactId>\n                </exclusion>\n",
                    xml_escape(&exclusion.group_id),
                    xml_escape(&exclusion.artifact_id)
                );
            }
            xml.push_str("            </exclusions>\n");
        }
        xml.push_str("        </dependency>");
        xml
    }

    fn property_snippet(&self, property: &BuildProperty) -> String {
        format!(
            "        <{name}>{value}</{name}>",
            name = property.name,
            value = xml_escape(&property.value)
        )
    }
}
