//! Show command - displays information.

use anyhow::Result;
use std::path::Path;

use debforge::build::control::CONTROL_DIR;
use debforge::build::service::init_script_path;
use debforge::build::starter::{desktop_entry_path, launcher_path};
use debforge::config::{check_enabled, Config};
use debforge::manifest::Manifest;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show host configuration
    Config,
    /// Show the resolved manifest as JSON
    Manifest,
    /// Show the staged paths a build would produce
    Layout,
}

/// Execute the show command.
pub fn cmd_show(manifest_path: &Path, target: ShowTarget, config: &Config) -> Result<()> {
    match target {
        ShowTarget::Config => config.print(),
        ShowTarget::Manifest => {
            let manifest = Manifest::load(manifest_path)?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
        ShowTarget::Layout => {
            let manifest = Manifest::load(manifest_path)?;
            for line in layout(&manifest, config) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

/// Staged paths, relative to the staging root, in build order.
pub fn layout(manifest: &Manifest, config: &Config) -> Vec<String> {
    let package = &manifest.package;
    let base_name = package.base_name();
    let mut lines = vec![format!("usr/share/{}/", base_name)];

    for service in &manifest.services {
        lines.push(format!("{} (conffile)", init_script_path(&service.unix_name())));
    }
    for starter in &manifest.starters {
        let unix_name = starter.unix_name();
        lines.push(launcher_path(&unix_name));
        lines.push(desktop_entry_path(&unix_name));
    }

    lines.push(format!("{}/control", CONTROL_DIR));
    if !manifest.services.is_empty() {
        lines.push(format!("{}/conffiles", CONTROL_DIR));
        lines.push(format!("{}/postinst", CONTROL_DIR));
        lines.push(format!("{}/postrm", CONTROL_DIR));
    }
    lines.push(format!("usr/share/doc/{}/copyright", base_name));

    let check = config.check_package_option(package.check_package.as_deref());
    lines.push(format!(
        "-> {} (lint: {})",
        package.destination_dir.join(package.package_file()).display(),
        if check_enabled(check) { "yes" } else { "no" }
    ));
    lines
}
