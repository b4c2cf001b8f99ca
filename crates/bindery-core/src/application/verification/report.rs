use std::time::Duration;

use serde::Serialize;

use super::harness::VerificationCase;

/// One assertion about a generated project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Check {
    pub description: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Check {
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            detail: None,
        }
    }

    pub fn fail(description: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: false,
            detail: Some(detail.into()),
        }
    }

    /// Pass when `ok`, otherwise fail with `detail`.
    pub fn expect(description: impl Into<String>, ok: bool, detail: impl FnOnce() -> String) -> Self {
        if ok {
            Self::pass(description)
        } else {
            Self::fail(description, detail())
        }
    }
}

/// All checks of one case.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub case: VerificationCase,
    pub checks: Vec<Check>,
    pub elapsed: Duration,
}

impl VerificationReport {
    pub fn new(case: VerificationCase) -> Self {
        Self {
            case,
            checks: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn push(&mut self, check: Check) {
        self.checks.push(check);
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}
