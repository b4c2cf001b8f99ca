//! Generation through the real renderer and built-in services.

use std::path::Path;

use bindery_adapters::{HandlebarsRenderer, InMemoryServiceStore, MemoryFilesystem};
use bindery_core::prelude::*;

fn catalog() -> ServiceCatalog {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/resources/bluemix.json");
    ServiceCatalog::from_json_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

fn service(fs: &MemoryFilesystem) -> GenerateService {
    GenerateService::new(
        Box::new(InMemoryServiceStore::with_builtin().unwrap()),
        Box::new(HandlebarsRenderer::new()),
        Box::new(fs.clone()),
    )
}

fn target(framework: Framework, build_system: BuildSystem) -> Target {
    Target::builder()
        .project_name("orders")
        .framework(framework)
        .build_system(build_system)
        .build()
        .unwrap()
}

fn read(fs: &MemoryFilesystem, rel: &str) -> String {
    fs.read_file(&Path::new("/out/orders").join(rel))
        .unwrap_or_else(|| panic!("{rel} was not written"))
}

#[test]
fn dashdb_on_liberty_writes_no_credential_sources() {
    let fs = MemoryFilesystem::new();
    let request = GenerationRequest::new(target(Framework::Liberty, BuildSystem::Maven), "/out/orders")
        .with_service("dashDb");

    let report = service(&fs).generate(&request, &catalog()).unwrap();
    assert!(!report.wiring);

    let server = read(&fs, "src/main/liberty/config/server.xml");
    assert!(server.contains("<feature>jdbc-4.2</feature>"));
    assert!(!server.contains("<feature>cdi-1.2</feature>"));
    assert!(server.contains("jndiName=\"jdbc/dashdb/url\""));

    let env = read(&fs, "src/main/liberty/config/server.env");
    assert!(env.contains("dashdb_dsn=DATABASE=BLUDB;"));
    assert!(env.contains("dashdb_ssljdbcurl=jdbc:db2://"));

    assert!(!fs.exists(Path::new(
        "/out/orders/src/main/java/application/bluemix/VCAPServices.java"
    )));
    assert!(fs.exists(Path::new("/out/orders/src/main/resources/mappings.json")));
}

#[test]
fn every_bound_service_is_merged_by_default() {
    let fs = MemoryFilesystem::new();
    let catalog = catalog();
    let generator = service(&fs);
    let keys = generator
        .bindable_services(&catalog, Framework::Spring)
        .unwrap();
    assert_eq!(keys.len(), 3);

    let request = GenerationRequest::new(target(Framework::Spring, BuildSystem::Maven), "/out/orders")
        .with_services(keys);
    let report = generator.generate(&request, &catalog).unwrap();
    assert!(report.wiring);

    let pom = read(&fs, "pom.xml");
    assert!(pom.contains("<artifactId>cloudant-client</artifactId>"));
    assert!(pom.contains("<artifactId>natural-language-classifier</artifactId>"));
    assert!(pom.contains("<artifactId>spring-boot-starter-jdbc</artifactId>"));

    let local = read(&fs, "src/main/resources/application-local.properties");
    assert!(local.contains("cloudant_url=https://account.cloudant.com"));
    assert!(local.contains("watson_natural_language_classifier_username=nlc-user"));

    let vcap = read(&fs, "src/main/java/application/bluemix/VCAPServices.java");
    assert!(vcap.contains("import com.fasterxml.jackson.databind.JsonNode;"));
}

#[test]
fn mappings_point_at_catalog_labels() {
    let fs = MemoryFilesystem::new();
    let request = GenerationRequest::new(target(Framework::Liberty, BuildSystem::Gradle), "/out/orders")
        .with_service("cloudant");
    service(&fs).generate(&request, &catalog()).unwrap();

    let mappings: serde_json::Value =
        serde_json::from_str(&read(&fs, "src/main/resources/mappings.json")).unwrap();
    let patterns = &mappings["cloudant_url"]["searchPatterns"];
    assert_eq!(
        patterns[0],
        "cloudfoundry:$['cloudantNoSQLDB'][0].credentials.url"
    );
    assert_eq!(patterns[1], "env:cloudant_url");
}

#[test]
fn spring_only_service_is_rejected_for_liberty() {
    let fs = MemoryFilesystem::new();
    let request = GenerationRequest::new(target(Framework::Liberty, BuildSystem::Maven), "/out/orders")
        .with_service("naturalLanguageClassifier");

    let err = service(&fs).generate(&request, &catalog()).unwrap_err();
    assert!(err.to_string().contains("java-liberty"));
    assert!(fs.list_files().is_empty());
}
