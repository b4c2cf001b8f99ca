//! `bindery generate`: write a project bound to catalog services.

use serde_json::json;
use tracing::{info, instrument};

use bindery_core::{
    application::GenerationRequest,
    domain::{BuildSystem, Framework, ServiceKey, Target},
};

use crate::{
    cli::GenerateArgs,
    commands::{catalog_path, generator, load_catalog},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(name = %args.name))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let framework = args
        .framework
        .map(Framework::from)
        .unwrap_or(config.defaults.framework);
    let build_system = args
        .build_system
        .map(BuildSystem::from)
        .unwrap_or(config.defaults.build_system);

    let target = Target::builder()
        .project_name(args.name.as_str())
        .framework(framework)
        .build_system(build_system)
        .build()
        .map_err(|e| CliError::Core(e.into()))?;

    let catalog = load_catalog(&catalog_path(args.catalog, &config)?)?;
    let service = generator(&config)?;

    let services: Vec<ServiceKey> = if args.services.is_empty() {
        service.bindable_services(&catalog, framework)?
    } else {
        args.services.into_iter().map(ServiceKey::from).collect()
    };
    if services.is_empty() {
        return Err(CliError::InvalidInput {
            message: format!("no service in the catalog can be bound to {framework}"),
        });
    }

    let root = args.output.join(&args.name);
    let request = GenerationRequest::new(target, &root)
        .with_services(services)
        .overwrite(args.force);

    if args.dry_run {
        let plan = service.plan(&request, &catalog)?;
        let files: Vec<String> = plan.structure.files().map(|f| f.path.to_string()).collect();

        if output.is_json() {
            output.json(&json!({
                "dry_run": true,
                "root": root,
                "services": plan.services,
                "wiring": plan.wiring,
                "files": files,
            }))?;
            return Ok(());
        }

        output.header(&format!("Would create {} in {}", request.target, root.display()))?;
        output.info(&format!("Services: {}", join_keys(&plan.services)))?;
        for file in &files {
            output.item(file)?;
        }
        return Ok(());
    }

    let report = service.generate(&request, &catalog)?;
    info!(run_id = %report.run_id, files = report.files.len(), "Project generated");

    if output.is_json() {
        output.json(&json!({
            "run_id": report.run_id.to_string(),
            "root": report.root,
            "services": report.services,
            "wiring": report.wiring,
            "files": report.files,
        }))?;
        return Ok(());
    }

    output.success(&format!(
        "Created {} at {}",
        request.target,
        report.root.display()
    ))?;
    output.info(&format!("Services: {}", join_keys(&report.services)))?;
    for file in &report.files {
        output.item(file.as_str())?;
    }
    if !report.wiring {
        output.warning("No service ships credential sources for this framework")?;
    }
    Ok(())
}

fn join_keys(keys: &[ServiceKey]) -> String {
    keys.iter()
        .map(ServiceKey::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_comma_separated() {
        let keys = [ServiceKey::from("dashDb"), ServiceKey::from("cloudant")];
        assert_eq!(join_keys(&keys), "dashDb, cloudant");
        assert_eq!(join_keys(&[]), "");
    }
}
