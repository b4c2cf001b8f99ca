//! Services that ship with Bindery.
//!
//! Templates are embedded at compile time from `services/`, so the binary
//! works without any files next to it. The list is explicit: adding a
//! built-in means adding a constructor here and a line to [`all`].

use bindery_core::{
    domain::{DomainError, Framework, RelativePath, ServiceDefinition, TemplateFile, TemplateSet},
    error::BinderyResult,
};

macro_rules! service_file {
    ($path:literal) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/services/", $path))
    };
}

/// Every built-in definition, in listing order.
pub fn all() -> BinderyResult<Vec<ServiceDefinition>> {
    Ok(vec![dashdb()?, cloudant()?, natural_language_classifier()?])
}

/// Db2 Warehouse. No instrumentation, so no credential sources are emitted.
pub fn dashdb() -> BinderyResult<ServiceDefinition> {
    Ok(ServiceDefinition::new("service-dashdb", "dashDb")
        .with_display_name("Db2 Warehouse")
        .with_local_dev_keys(["dsn", "ssljdbcurl"])
        .with_templates(
            Framework::Liberty,
            TemplateSet::new(service_file!(
                "service-dashdb/templates/java-liberty/config.json.template"
            )),
        )
        .with_templates(
            Framework::Spring,
            TemplateSet::new(service_file!(
                "service-dashdb/templates/java-spring/config.json.template"
            )),
        ))
}

const CLOUDANT_LIBERTY_CLIENT: &str = "src/main/java/application/cloudant/CloudantClientFactory.java";
const CLOUDANT_SPRING_CLIENT: &str = "src/main/java/application/cloudant/CloudantClientConfig.java";

pub fn cloudant() -> BinderyResult<ServiceDefinition> {
    let liberty = TemplateSet::new(service_file!(
        "service-cloudant/templates/java-liberty/config.json.template"
    ))
    .with_file(TemplateFile::from_source(
        CLOUDANT_LIBERTY_CLIENT,
        service_file!(
            "service-cloudant/templates/java-liberty/src/main/java/application/cloudant/CloudantClientFactory.java"
        ),
    )?);
    let spring = TemplateSet::new(service_file!(
        "service-cloudant/templates/java-spring/config.json.template"
    ))
    .with_file(TemplateFile::from_source(
        CLOUDANT_SPRING_CLIENT,
        service_file!(
            "service-cloudant/templates/java-spring/src/main/java/application/cloudant/CloudantClientConfig.java"
        ),
    )?);

    Ok(ServiceDefinition::new("service-cloudant", "cloudant")
        .with_display_name("Cloudant NoSQL DB")
        .with_local_dev_keys(["url", "username", "password"])
        .with_templates(Framework::Liberty, liberty)
        .with_templates(Framework::Spring, spring)
        .with_instrumentation(Framework::Liberty, paths(&[CLOUDANT_LIBERTY_CLIENT])?)
        .with_instrumentation(Framework::Spring, paths(&[CLOUDANT_SPRING_CLIENT])?))
}

const NLC_SPRING_CLIENT: &str = "src/main/java/application/nlc/NaturalLanguageClassifierConfig.java";

/// Watson Natural Language Classifier. Spring only.
pub fn natural_language_classifier() -> BinderyResult<ServiceDefinition> {
    let spring = TemplateSet::new(service_file!(
        "service-watson-natural-language-classifier/templates/java-spring/config.json.template"
    ))
    .with_file(TemplateFile::from_source(
        NLC_SPRING_CLIENT,
        service_file!(
            "service-watson-natural-language-classifier/templates/java-spring/src/main/java/application/nlc/NaturalLanguageClassifierConfig.java"
        ),
    )?);

    Ok(ServiceDefinition::new(
        "service-watson-natural-language-classifier",
        "naturalLanguageClassifier",
    )
    .with_display_name("Watson Natural Language Classifier")
    .with_local_dev_keys(["url", "username", "password"])
    .with_templates(Framework::Spring, spring)
    .with_instrumentation(Framework::Spring, paths(&[NLC_SPRING_CLIENT])?))
}

fn paths(files: &[&str]) -> Result<Vec<RelativePath>, DomainError> {
    files.iter().map(RelativePath::try_new).collect()
}
