//! Implementation of the `bindery list` command.

use bindery_core::{
    application::{CatalogService, ServiceSummary},
    domain::Framework,
};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::service_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = CatalogService::new(Box::new(service_store(&config)?));
    let services = service.list(args.framework.map(Framework::from))?;

    // --output-format json wins over --format
    if output.is_json() {
        output.json(&services)?;
        return Ok(());
    }

    match args.format {
        ListFormat::Table => {
            output.header("Available Services:")?;
            for summary in &services {
                output.print(&table_row(summary))?;
            }
        }

        ListFormat::Json => output.json(&services)?,

        ListFormat::List => {
            for summary in &services {
                output.print(&summary.key)?;
            }
        }
    }

    Ok(())
}

fn table_row(summary: &ServiceSummary) -> String {
    let instrumented = if summary.instrumented.is_empty() {
        "-".to_string()
    } else {
        summary.instrumented.join(",")
    };
    format!(
        "  {:<28} {:<36} frameworks: {:<15} instrumented: {}",
        summary.key,
        summary.name,
        summary.frameworks.join(","),
        instrumented
    )
}
