//! Preflight checks for a package build.
//!
//! Validates host tools and manifest inputs before starting a build.
//! Run with `debforge preflight` to check everything is ready.

mod host_tools;
mod inputs;
mod types;

use anyhow::{bail, Result};

use crate::config::Config;
use crate::manifest::Manifest;

pub use types::{CheckResult, CheckStatus, PreflightReport};

/// Run all preflight checks.
///
/// The manifest is optional: without one only host tools are checked.
pub fn run_preflight(config: &Config, manifest: Option<&Manifest>) -> PreflightReport {
    let mut checks = Vec::new();

    println!("Running preflight checks...\n");

    println!("Checking host tools...");
    checks.extend(host_tools::check_host_tools(config, manifest));

    if let Some(manifest) = manifest {
        println!("Checking manifest inputs...");
        checks.extend(inputs::check_inputs(manifest));
    }

    println!();

    PreflightReport { checks }
}

/// Run preflight and bail if any checks fail.
pub fn run_preflight_or_fail(config: &Config, manifest: Option<&Manifest>) -> Result<()> {
    let report = run_preflight(config, manifest);
    report.print();

    if !report.all_passed() {
        bail!(
            "Preflight failed: {} check(s) failed. Fix the issues above before building.",
            report.fail_count()
        );
    }

    println!("All preflight checks passed!\n");
    Ok(())
}
