//! Preflight command - runs preflight checks.

use anyhow::Result;
use std::path::Path;

use debforge::config::Config;
use debforge::manifest::Manifest;
use debforge::preflight;

/// Execute the preflight command.
///
/// A missing manifest is not an error here; only host tools are checked.
pub fn cmd_preflight(manifest_path: &Path, config: &Config, strict: bool) -> Result<()> {
    let manifest = if manifest_path.exists() {
        Some(Manifest::load(manifest_path)?)
    } else {
        println!(
            "[WARN] {} not found, checking host tools only\n",
            manifest_path.display()
        );
        None
    };

    if strict {
        preflight::run_preflight_or_fail(config, manifest.as_ref())?;
    } else {
        let report = preflight::run_preflight(config, manifest.as_ref());
        report.print();
        if !report.all_passed() {
            println!("Some checks failed. Use --strict to fail the build.");
        }
    }
    Ok(())
}
