//! `bindery verify`: generate every bound service combination and check
//! the result.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tempfile::TempDir;
use tracing::{info, instrument, warn};

use bindery_core::{
    application::verification::{
        Check, VerificationCase, VerificationHarness, VerificationReport,
    },
    domain::{BuildSystem, Framework, ServiceKey},
};

use crate::{
    cli::VerifyArgs,
    commands::{catalog_path, generator, load_catalog},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: VerifyArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let catalog = load_catalog(&catalog_path(args.catalog, &config)?)?;
    let harness = VerificationHarness::new(generator(&config)?, catalog);

    let budget = Duration::from_secs(args.budget.unwrap_or(config.verify.budget_secs));
    let service = args.service.map(ServiceKey::from);
    let cases = harness.cases(
        args.framework.map(Framework::from),
        args.build_system.map(BuildSystem::from),
        service.as_ref(),
    )?;

    if cases.is_empty() {
        return Err(CliError::InvalidInput {
            message: "no verification case matches the catalog and filters".into(),
        });
    }

    if !output.is_json() {
        output.header(&format!("Verifying {} case(s)", cases.len()))?;
    }

    let started = Utc::now();
    let mut reports = Vec::with_capacity(cases.len());
    for (index, case) in cases.into_iter().enumerate() {
        let case = case.with_budget(budget);
        let workspace = Workspace::new(args.keep.as_deref(), index)?;
        let report = harness
            .verify(&case, workspace.path())
            .unwrap_or_else(|e| not_started(&case, e));

        if !output.is_json() {
            print_report(&output, &report)?;
        }
        reports.push(report);
    }

    let failed = reports.iter().filter(|r| !r.passed()).count();
    let total = reports.len();
    info!(total, failed, "Verification finished");

    if output.is_json() {
        output.json(&json!({
            "started_at": started.to_rfc3339(),
            "finished_at": Utc::now().to_rfc3339(),
            "total": total,
            "failed": failed,
            "reports": reports,
        }))?;
    } else if failed == 0 {
        output.success(&format!("All {total} case(s) passed"))?;
    }

    if failed > 0 {
        return Err(CliError::VerificationFailed { failed, total });
    }
    Ok(())
}

/// A case the harness could not start is a failed report, not the end of
/// the run.
fn not_started(case: &VerificationCase, err: impl std::fmt::Display) -> VerificationReport {
    warn!(case = %case, error = %err, "Case could not start");
    let mut report = VerificationReport::new(case.clone());
    report.push(Check::fail("case started", err.to_string()));
    report
}

fn print_report(output: &OutputManager, report: &VerificationReport) -> CliResult<()> {
    let summary = format!(
        "{} ({} checks, {:.2?})",
        report.case,
        report.checks.len(),
        report.elapsed
    );
    if report.passed() {
        output.success(&summary)?;
        return Ok(());
    }

    output.error(&summary)?;
    for check in report.failures() {
        let line = match &check.detail {
            Some(detail) => format!("{}: {}", check.description, detail),
            None => check.description.clone(),
        };
        output.item(&line)?;
    }
    Ok(())
}

/// Where one case generates its project: a scratch directory removed on
/// drop, or a numbered directory under `--keep`.
enum Workspace {
    Scratch(TempDir),
    Kept(PathBuf),
}

impl Workspace {
    fn new(keep: Option<&Path>, index: usize) -> CliResult<Self> {
        match keep {
            Some(dir) => {
                let path = dir.join(format!("case-{index:03}"));
                std::fs::create_dir_all(&path).with_cli_context(|| {
                    format!("Failed to create '{}'", path.display())
                })?;
                Ok(Self::Kept(path))
            }
            None => Ok(Self::Scratch(
                TempDir::new().with_cli_context(|| "Failed to create scratch directory")?,
            )),
        }
    }

    fn path(&self) -> &Path {
        match self {
            Self::Scratch(dir) => dir.path(),
            Self::Kept(path) => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cases_that_cannot_start_are_failed_reports() {
        let case = VerificationCase::new("ghost", Framework::Spring, BuildSystem::Gradle);
        let report = not_started(&case, "Service not found: ghost");

        assert!(!report.passed());
        assert_eq!(report.case, case);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.description, "case started");
        assert_eq!(failure.detail.as_deref(), Some("Service not found: ghost"));
    }

    #[test]
    fn kept_workspaces_are_numbered_and_survive() {
        let temp = TempDir::new().unwrap();
        let path = {
            let ws = Workspace::new(Some(temp.path()), 7).unwrap();
            ws.path().to_path_buf()
        };
        assert_eq!(path, temp.path().join("case-007"));
        assert!(path.is_dir());
    }

    #[test]
    fn scratch_workspaces_are_removed_on_drop() {
        let path = {
            let ws = Workspace::new(None, 0).unwrap();
            assert!(ws.path().is_dir());
            ws.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
