//! Verification harness.
//!
//! For a (service, framework, build system) case the harness generates a
//! project, re-renders the service's `config.json.template` on its own and
//! checks the generated files against that expectation. Checks never abort
//! a case; every outcome lands in the [`VerificationReport`].
//!
//! Dispatch is closed: [`verifier_for`] maps each `Framework` and
//! [`build_verifier_for`] each `BuildSystem` to exactly one verifier.

mod framework;
mod harness;
mod manifest;
mod report;

pub use framework::{FrameworkVerifier, GeneratedFiles, LibertyVerifier, SpringVerifier, verifier_for};
pub use harness::{DEFAULT_BUDGET, VERIFY_PROJECT_NAME, VerificationCase, VerificationHarness};
pub use manifest::{ManifestVerifier, build_verifier_for};
pub use report::{Check, VerificationReport};
