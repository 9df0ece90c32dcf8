//! Package assembly: staging tree to finished `.deb`.
//!
//! The steps run in a fixed order and the first failure stops the build:
//!
//! ```text
//! stage files -> normalize file modes -> services -> starters
//!   -> control metadata -> documentation -> normalize directory modes
//!   -> package tool -> lint tool (optional)
//! ```
//!
//! Nothing is rolled back on failure. The staging directory is scratch space
//! owned by this build and is wiped at the start of the next one.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::context::BuildContext;
use super::control::{ControlBuilder, ControlFiles};
use super::docs::DocumentationBuilder;
use super::permissions::{normalize_directories, normalize_files};
use super::service::setup_service;
use super::stage::stage_files;
use super::starter::setup_starter;
use crate::artifact::deb::{build_invocation, check_invocation};
use crate::common::prepare_work_dir;
use crate::config::{check_enabled, Config};
use crate::error::{BuildError, BuildStep, StepContext};
use crate::manifest::Manifest;
use crate::process::CommandRunner;
use crate::timing::Timer;

/// Builds one package from a manifest.
pub struct PackageAssembler<'a> {
    ctx: BuildContext<'a>,
    config: &'a Config,
    runner: &'a dyn CommandRunner,
}

impl<'a> PackageAssembler<'a> {
    pub fn new(manifest: &'a Manifest, config: &'a Config, runner: &'a dyn CommandRunner) -> Self {
        Self {
            ctx: BuildContext::new(manifest, config),
            config,
            runner,
        }
    }

    /// Run every step and return the path of the built package.
    pub fn build(&self) -> Result<PathBuf, BuildError> {
        let manifest = self.ctx.manifest;
        let package = &manifest.package;
        println!(
            "Building {} {} in {}",
            package.base_name(),
            package.version,
            self.ctx.staging.display()
        );

        let files_dir = self.ctx.files_dir();
        timed(BuildStep::StageFiles, || self.stage(&files_dir))?;
        timed(BuildStep::NormalizeFiles, || {
            normalize_files(&files_dir, &package.executables)
        })?;

        let mut control = ControlBuilder::new();
        timed(BuildStep::Services, || {
            for service in &manifest.services {
                setup_service(&self.ctx, &mut control, service)?;
            }
            Ok(())
        })?;
        timed(BuildStep::Starters, || {
            for starter in &manifest.starters {
                setup_starter(&self.ctx, starter)?;
            }
            Ok(())
        })?;
        let control_files: ControlFiles = timed(BuildStep::Control, || {
            control.finalize(package, &self.ctx.staging)
        })?;
        tracing::info!(
            "{}: conffiles {}, scripts [{}], Installed-Size {} KiB",
            control_files.control.display(),
            if control_files.conffiles.is_some() { "yes" } else { "no" },
            control_files
                .scripts
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy())
                .collect::<Vec<_>>()
                .join(", "),
            control_files.installed_size_kib
        );

        timed(BuildStep::Documentation, || {
            DocumentationBuilder::new(package, self.ctx.doc_dir()).build()
        })?;
        timed(BuildStep::NormalizeDirectories, || {
            normalize_directories(&self.ctx.staging)
        })?;

        let output = timed(BuildStep::BuildPackage, || self.build_package())?;

        let check = self
            .config
            .check_package_option(package.check_package.as_deref());
        if check_enabled(check) {
            timed(BuildStep::CheckPackage, || self.check_package(&output))?;
        } else {
            tracing::info!("check_package = {:?}, skipping lint", check.unwrap_or(""));
            println!("  [SKIP] {}", BuildStep::CheckPackage);
        }

        println!("Package: {}", output.display());
        Ok(output)
    }

    /// Fresh staging tree with the application files under `usr/share`.
    fn stage(&self, files_dir: &Path) -> Result<()> {
        prepare_work_dir(&self.ctx.staging)?;
        match &self.ctx.manifest.package.source_dir {
            Some(source) => {
                stage_files(source, files_dir)?;
            }
            None => {
                fs::create_dir_all(files_dir)
                    .with_context(|| format!("creating {}", files_dir.display()))?;
            }
        }
        Ok(())
    }

    fn build_package(&self) -> Result<PathBuf> {
        let package = &self.ctx.manifest.package;
        let destination = &package.destination_dir;
        fs::create_dir_all(destination)
            .with_context(|| format!("creating {}", destination.display()))?;

        let staging = fs::canonicalize(&self.ctx.staging)
            .with_context(|| format!("resolving {}", self.ctx.staging.display()))?;
        let output = fs::canonicalize(destination)
            .with_context(|| format!("resolving {}", destination.display()))?
            .join(package.package_file());

        build_invocation(self.config, &staging, &output).run(self.runner)?;
        Ok(output)
    }

    fn check_package(&self, output: &Path) -> Result<()> {
        check_invocation(self.config, output).run(self.runner)?;
        Ok(())
    }
}

fn timed<T>(step: BuildStep, f: impl FnOnce() -> Result<T>) -> Result<T, BuildError> {
    tracing::info!("{}", step);
    let timer = Timer::start(&step.to_string());
    let result = f().step(step);
    if result.is_ok() {
        timer.finish();
    }
    result
}
