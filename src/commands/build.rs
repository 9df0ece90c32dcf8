//! Build command - assembles the package described by a manifest.

use anyhow::Result;
use std::path::Path;
use std::time::Instant;

use debforge::build::PackageAssembler;
use debforge::config::Config;
use debforge::manifest::Manifest;
use debforge::process::SystemRunner;

/// Execute the build command.
pub fn cmd_build(manifest_path: &Path, config: &Config) -> Result<()> {
    println!("=== Debian Package Build ===\n");
    let build_start = Instant::now();

    let manifest = Manifest::load(manifest_path)?;
    let runner = SystemRunner;
    let output = PackageAssembler::new(&manifest, config, &runner).build()?;

    println!(
        "\n=== Build complete in {:.1}s: {} ===",
        build_start.elapsed().as_secs_f64(),
        output.display()
    );
    Ok(())
}
