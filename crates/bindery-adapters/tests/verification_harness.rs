//! End-to-end runs of the verification harness against real adapters.

use std::path::{Path, PathBuf};
use std::time::Duration;

use bindery_adapters::{
    FilesystemServiceLoader, HandlebarsRenderer, InMemoryServiceStore, LocalFilesystem,
    MemoryFilesystem,
};
use bindery_core::{
    application::verification::VERIFY_PROJECT_NAME,
    domain::{
        BuildSystem, Framework, RelativePath, ServiceCatalog, ServiceKey, TemplateFile,
    },
    prelude::*,
};
use serde_json::json;
use tempfile::TempDir;

fn resources() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources")
}

fn catalog() -> ServiceCatalog {
    let text = std::fs::read_to_string(resources().join("bluemix.json")).unwrap();
    ServiceCatalog::from_json_str(&text).unwrap()
}

fn harness(store: InMemoryServiceStore, catalog: ServiceCatalog) -> VerificationHarness {
    let generator = GenerateService::new(
        Box::new(store),
        Box::new(HandlebarsRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    VerificationHarness::new(generator, catalog)
}

fn assert_passed(report: &VerificationReport) {
    let failures: Vec<String> = report
        .failures()
        .map(|c| format!("{}: {}", c.description, c.detail.clone().unwrap_or_default()))
        .collect();
    assert!(report.passed(), "{} failed:\n{}", report.case, failures.join("\n"));
}

#[test]
fn every_builtin_combination_passes() {
    let harness = harness(InMemoryServiceStore::with_builtin().unwrap(), catalog());
    let cases = harness.cases(None, None, None).unwrap();

    // 2 build systems x (2 liberty + 3 spring services)
    assert_eq!(cases.len(), 10);

    for case in &cases {
        let temp = TempDir::new().unwrap();
        let report = harness.verify(case, temp.path()).unwrap();
        assert_passed(&report);
        assert!(temp.path().join(VERIFY_PROJECT_NAME).exists());
    }
}

#[test]
fn cases_can_be_filtered() {
    let harness = harness(InMemoryServiceStore::with_builtin().unwrap(), catalog());

    let liberty = harness.cases(Some(Framework::Liberty), None, None).unwrap();
    assert_eq!(liberty.len(), 4);
    assert!(liberty.iter().all(|c| c.framework == Framework::Liberty));

    let nlc = ServiceKey::from("naturalLanguageClassifier");
    let cases = harness
        .cases(None, Some(BuildSystem::Gradle), Some(&nlc))
        .unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].framework, Framework::Spring);
}

#[test]
fn unbound_services_are_skipped() {
    let partial = ServiceCatalog::from_value(json!({
        "dashDb": catalog().raw()["dashDb"].clone()
    }))
    .unwrap();
    let harness = harness(InMemoryServiceStore::with_builtin().unwrap(), partial);

    let cases = harness.cases(None, None, None).unwrap();
    assert_eq!(cases.len(), 4);
    assert!(cases.iter().all(|c| c.service.as_str() == "dashDb"));
}

#[test]
fn test_service_generates_liberty_credentials() {
    let store = InMemoryServiceStore::with_builtin().unwrap();
    let test_service = FilesystemServiceLoader::new()
        .load(&resources().join("service-test"))
        .unwrap();
    store.insert(test_service).unwrap();

    let catalog = catalog()
        .with_entry(
            "test",
            json!({
                "url": "https://account.test.com",
                "serviceInfo": {
                    "label": "test-label",
                    "name": "test-name",
                    "plan": "test-plan"
                }
            }),
        )
        .unwrap();
    let harness = harness(store, catalog);

    let temp = TempDir::new().unwrap();
    let case = VerificationCase::new("test", Framework::Liberty, BuildSystem::Maven);
    let report = harness.verify(&case, temp.path()).unwrap();
    assert_passed(&report);

    let root = temp.path().join(VERIFY_PROJECT_NAME);
    let bluemix = root.join("src/main/java/application/bluemix");
    for file in [
        "BluemixCredentials.java",
        "InvalidCredentialsException.java",
        "ServiceName.java",
    ] {
        assert!(bluemix.join(file).exists(), "{file} missing");
    }
    let vcap = std::fs::read_to_string(bluemix.join("VCAPServices.java")).unwrap();
    assert!(vcap.contains("import javax.json.Json;"));
    assert!(!vcap.contains("import com.fasterxml.jackson.databind.JsonNode;"));

    let client =
        std::fs::read_to_string(root.join("src/main/java/application/test/TestClient.java"))
            .unwrap();
    assert!(client.contains("@ServiceName(name = \"test-name\")"));

    let env = std::fs::read_to_string(root.join("src/main/liberty/config/server.env")).unwrap();
    assert_eq!(env.trim(), "test_url=https://account.test.com");

    let pom = std::fs::read_to_string(root.join("pom.xml")).unwrap();
    assert!(pom.contains("<test.plan>test-plan</test.plan>"));

    // No Spring artifacts
    assert!(!root.join("src/main/resources/application.properties").exists());
    assert!(!root.join("src/main/resources/application-local.properties").exists());
    assert!(!root.join("localdev-config.json").exists());
}

#[test]
fn unbound_case_cannot_start() {
    let harness = harness(InMemoryServiceStore::with_builtin().unwrap(), ServiceCatalog::empty());
    let temp = TempDir::new().unwrap();
    let case = VerificationCase::new("dashDb", Framework::Liberty, BuildSystem::Maven);
    assert!(harness.verify(&case, temp.path()).is_err());
}

#[test]
fn harness_runs_against_memory_filesystem() {
    let fs = MemoryFilesystem::new();
    let generator = GenerateService::new(
        Box::new(InMemoryServiceStore::with_builtin().unwrap()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(fs.clone()),
    );
    let harness = VerificationHarness::new(generator, catalog());

    let case = VerificationCase::new("cloudant", Framework::Spring, BuildSystem::Gradle);
    let report = harness.verify(&case, Path::new("/verify")).unwrap();
    assert_passed(&report);

    let props = fs
        .read_file(Path::new("/verify/app/src/main/resources/application.properties"))
        .unwrap();
    assert!(props.contains("cloudant.password=cloudant&pass<word>"));
    assert!(fs.exists(Path::new("/verify/app/build.gradle")));
}

#[test]
fn wiring_dependencies_keep_provided_scope() {
    const CLIENT: &str = "src/main/java/application/x/XClient.java";
    let config = r#"{
        "dependencies": [
            { "groupId": "javax.json", "artifactId": "javax.json-api", "version": "1.0", "scope": "compile" },
            { "groupId": "com.example", "artifactId": "x-client", "version": "1.0" }
        ]
    }"#;
    let service = ServiceDefinition::new("service-x", "x")
        .with_local_dev_keys(["url"])
        .with_templates(
            Framework::Liberty,
            TemplateSet::new(config).with_file(
                TemplateFile::from_source(CLIENT, "package application.x;\n\npublic class XClient {}\n")
                    .unwrap(),
            ),
        )
        .with_instrumentation(Framework::Liberty, vec![RelativePath::try_new(CLIENT).unwrap()]);

    let store = InMemoryServiceStore::with_builtin().unwrap();
    store.insert(service).unwrap();
    let catalog = catalog()
        .with_entry(
            "x",
            json!({
                "url": "https://x.example.com",
                "serviceInfo": { "label": "x-label", "name": "x-name", "plan": "x-plan" }
            }),
        )
        .unwrap();
    let harness = harness(store, catalog);

    let temp = TempDir::new().unwrap();
    let case = VerificationCase::new("x", Framework::Liberty, BuildSystem::Maven);
    let report = harness.verify(&case, temp.path()).unwrap();
    assert_passed(&report);

    let pom = std::fs::read_to_string(temp.path().join(VERIFY_PROJECT_NAME).join("pom.xml")).unwrap();
    assert_eq!(pom.matches("<artifactId>javax.json-api</artifactId>").count(), 1);
    assert!(pom.contains(
        "<artifactId>javax.json-api</artifactId>\n            <version>1.0</version>\n            <scope>provided</scope>"
    ));
    assert!(pom.contains("<artifactId>x-client</artifactId>"));
}

// ── Altered output ───────────────────────────────────────────────────────────

type Edit = Box<dyn Fn(&Path, &str) -> Vec<(PathBuf, String)> + Send + Sync>;

/// Memory filesystem that routes every write through `edit`, so a test can
/// change what the generator left behind before the checks read it.
struct EditedFilesystem {
    inner: MemoryFilesystem,
    edit: Edit,
}

impl Filesystem for EditedFilesystem {
    fn create_dir_all(&self, path: &Path) -> BinderyResult<()> {
        self.inner.create_dir_all(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> BinderyResult<()> {
        for (path, content) in (self.edit)(path, content) {
            if let Some(parent) = path.parent() {
                self.inner.create_dir_all(parent)?;
            }
            self.inner.write_file(&path, &content)?;
        }
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> BinderyResult<String> {
        self.inner.read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn remove_dir_all(&self, path: &Path) -> BinderyResult<()> {
        self.inner.remove_dir_all(path)
    }
}

const ROOT: &str = "/verify/app";

fn verify_edited(
    case: VerificationCase,
    edit: impl Fn(&Path, &str) -> Vec<(PathBuf, String)> + Send + Sync + 'static,
) -> VerificationReport {
    let fs = EditedFilesystem {
        inner: MemoryFilesystem::new(),
        edit: Box::new(edit),
    };
    let generator = GenerateService::new(
        Box::new(InMemoryServiceStore::with_builtin().unwrap()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(fs),
    );
    VerificationHarness::new(generator, catalog())
        .verify(&case, Path::new("/verify"))
        .unwrap()
}

fn failed(report: &VerificationReport) -> Vec<String> {
    report.failures().map(|c| c.description.clone()).collect()
}

fn keep(path: &Path, content: &str) -> Vec<(PathBuf, String)> {
    vec![(path.to_path_buf(), content.to_string())]
}

const SERVER_ENV: &str = "src/main/liberty/config/server.env";
const VCAP: &str = "src/main/java/application/bluemix/VCAPServices.java";

#[test]
fn extra_local_dev_entry_fails() {
    let case = VerificationCase::new("dashDb", Framework::Liberty, BuildSystem::Maven);
    let report = verify_edited(case, |path, content| {
        if path.ends_with(SERVER_ENV) {
            return keep(path, &format!("{content}stray_entry=1\n"));
        }
        keep(path, content)
    });
    assert_eq!(
        failed(&report),
        vec![format!("{SERVER_ENV} holds exactly the local-dev entries")]
    );
}

#[test]
fn missing_local_dev_entry_fails() {
    let case = VerificationCase::new("dashDb", Framework::Liberty, BuildSystem::Gradle);
    let report = verify_edited(case, |path, content| {
        if path.ends_with(SERVER_ENV) {
            let first = content.lines().next().unwrap_or_default();
            return keep(path, &format!("{first}\n"));
        }
        keep(path, content)
    });
    assert_eq!(
        failed(&report),
        vec![format!("{SERVER_ENV} holds exactly the local-dev entries")]
    );
}

#[test]
fn credential_sources_without_instrumentation_fail() {
    let case = VerificationCase::new("dashDb", Framework::Liberty, BuildSystem::Maven);
    let report = verify_edited(case, |path, content| {
        let mut writes = keep(path, content);
        if path.ends_with(SERVER_ENV) {
            writes.push((
                Path::new(ROOT).join("src/main/java/application/bluemix/BluemixCredentials.java"),
                "package application.bluemix;\n".into(),
            ));
        }
        writes
    });
    assert_eq!(
        failed(&report),
        vec!["src/main/java/application/bluemix/BluemixCredentials.java is absent"]
    );
}

#[test]
fn missing_credential_source_with_instrumentation_fails() {
    let case = VerificationCase::new("cloudant", Framework::Liberty, BuildSystem::Maven);
    let report = verify_edited(case, |path, content| {
        if path.ends_with(VCAP) {
            return Vec::new();
        }
        keep(path, content)
    });
    let failures = failed(&report);
    assert!(failures.contains(&format!("{VCAP} exists")), "{failures:?}");
    assert!(failures.contains(&format!("{VCAP} contains 'import javax.json.Json;'")));
    assert_eq!(failures.len(), 2);
}

#[test]
fn wrong_vcap_services_variant_fails() {
    let case = VerificationCase::new("cloudant", Framework::Liberty, BuildSystem::Gradle);
    let report = verify_edited(case, |path, content| {
        if path.ends_with(VCAP) {
            return keep(
                path,
                &content.replace(
                    "import javax.json.Json;",
                    "import com.fasterxml.jackson.databind.JsonNode;",
                ),
            );
        }
        keep(path, content)
    });
    assert_eq!(
        failed(&report),
        vec![format!("{VCAP} contains 'import javax.json.Json;'")]
    );
}

#[test]
fn missing_mappings_file_fails() {
    let case = VerificationCase::new("cloudant", Framework::Spring, BuildSystem::Maven);
    let report = verify_edited(case, |path, content| {
        if path.ends_with("src/main/resources/mappings.json") {
            return Vec::new();
        }
        keep(path, content)
    });
    assert_eq!(failed(&report), vec!["src/main/resources/mappings.json exists"]);
}

#[test]
fn legacy_local_dev_file_fails() {
    let case = VerificationCase::new("cloudant", Framework::Spring, BuildSystem::Gradle);
    let report = verify_edited(case, |path, content| {
        let mut writes = keep(path, content);
        if path.ends_with("src/main/resources/mappings.json") {
            writes.push((Path::new(ROOT).join("localdev-config.json"), "{}".into()));
        }
        writes
    });
    assert_eq!(failed(&report), vec!["localdev-config.json does not exist"]);
}

#[test]
fn exceeded_budget_fails() {
    let case = VerificationCase::new("dashDb", Framework::Spring, BuildSystem::Maven)
        .with_budget(Duration::ZERO);
    let report = verify_edited(case, keep);
    let failures = failed(&report);
    assert_eq!(failures.len(), 1, "{failures:?}");
    assert!(failures[0].starts_with("finished within"));
}
