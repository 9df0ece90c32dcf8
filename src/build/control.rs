//! Control metadata: `DEBIAN/control`, `DEBIAN/conffiles` and the
//! maintainer scripts.
//!
//! Generators contribute fragments through [`ControlBuilder`]; nothing is
//! written until [`ControlBuilder::finalize`], which consumes the builder.
//! Fragments keep their contribution order and are never deduplicated.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::files::{write_file_mode, EXEC_MODE, FILE_MODE};
use crate::manifest::Package;

/// Name of the control subdirectory at the staging root.
pub const CONTROL_DIR: &str = "DEBIAN";

/// Maintainer script lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    PreInst,
    PostInst,
    PreRm,
    PostRm,
}

impl Script {
    pub const ALL: [Script; 4] = [
        Script::PreInst,
        Script::PostInst,
        Script::PreRm,
        Script::PostRm,
    ];

    /// File name inside the control directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Script::PreInst => "preinst",
            Script::PostInst => "postinst",
            Script::PreRm => "prerm",
            Script::PostRm => "postrm",
        }
    }

    fn index(self) -> usize {
        match self {
            Script::PreInst => 0,
            Script::PostInst => 1,
            Script::PreRm => 2,
            Script::PostRm => 3,
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Collects conffiles and script fragments until finalize.
#[derive(Debug, Default)]
pub struct ControlBuilder {
    conf_files: Vec<String>,
    fragments: [Vec<String>; 4],
}

/// What [`ControlBuilder::finalize`] wrote.
#[derive(Debug, Clone)]
pub struct ControlFiles {
    pub control: PathBuf,
    pub conffiles: Option<PathBuf>,
    pub scripts: Vec<PathBuf>,
    pub installed_size_kib: u64,
}

impl ControlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a staged path (relative to the staging root) as a conffile.
    pub fn add_conf_file(&mut self, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!("conffile: {}", path);
        self.conf_files.push(path);
    }

    /// Append `text` to the script for `script`.
    pub fn add_fragment(&mut self, script: Script, text: impl Into<String>) {
        let text = text.into();
        tracing::debug!("{} fragment: {}", script, text.lines().next().unwrap_or(""));
        self.fragments[script.index()].push(text);
    }

    pub fn conf_files(&self) -> &[String] {
        &self.conf_files
    }

    pub fn fragments(&self, script: Script) -> &[String] {
        &self.fragments[script.index()]
    }

    /// Script body for `script`, or `None` when nothing was contributed.
    pub fn render_script(&self, script: Script) -> Option<String> {
        let fragments = self.fragments(script);
        if fragments.is_empty() {
            return None;
        }
        Some(format!("#!/bin/sh\nset -e\n{}\n", fragments.join("\n")))
    }

    /// `DEBIAN/conffiles` content, or `None` when no conffile was registered.
    pub fn render_conffiles(&self) -> Option<String> {
        if self.conf_files.is_empty() {
            return None;
        }
        let mut out = String::new();
        for path in &self.conf_files {
            if !path.starts_with('/') {
                out.push('/');
            }
            out.push_str(path);
            out.push('\n');
        }
        Some(out)
    }

    /// Write all control files into `staging/DEBIAN`.
    ///
    /// Installed-Size is measured here, so every payload file must already
    /// be staged.
    pub fn finalize(self, package: &Package, staging: &Path) -> Result<ControlFiles> {
        let control_dir = staging.join(CONTROL_DIR);
        fs::create_dir_all(&control_dir)
            .with_context(|| format!("creating {}", control_dir.display()))?;

        let installed_size_kib = installed_size_kib(staging)?;

        let control = control_dir.join("control");
        write_file_mode(&control, render_control(package, installed_size_kib), FILE_MODE)?;

        let conffiles = match self.render_conffiles() {
            Some(content) => {
                let path = control_dir.join("conffiles");
                write_file_mode(&path, content, FILE_MODE)?;
                Some(path)
            }
            None => None,
        };

        let mut scripts = Vec::new();
        for script in Script::ALL {
            if let Some(body) = self.render_script(script) {
                let path = control_dir.join(script.file_name());
                write_file_mode(&path, body, EXEC_MODE)?;
                scripts.push(path);
            }
        }

        Ok(ControlFiles {
            control,
            conffiles,
            scripts,
            installed_size_kib,
        })
    }
}

/// Render `DEBIAN/control`.
pub fn render_control(package: &Package, installed_size_kib: u64) -> String {
    let mut out = String::new();
    out.push_str(&format!("Package: {}\n", package.base_name()));
    out.push_str(&format!("Version: {}\n", package.version));
    out.push_str(&format!("Section: {}\n", package.section));
    out.push_str(&format!("Priority: {}\n", package.priority));
    out.push_str(&format!("Architecture: {}\n", package.architecture));
    out.push_str(&format!("Installed-Size: {}\n", installed_size_kib));
    if let Some(maintainer) = &package.maintainer {
        out.push_str(&format!("Maintainer: {}\n", maintainer));
    }
    if let Some(depends) = &package.depends {
        out.push_str(&format!("Depends: {}\n", depends));
    }
    if let Some(homepage) = &package.homepage {
        out.push_str(&format!("Homepage: {}\n", homepage));
    }
    out.push_str(&format_description(&package.description, &package.application));
    out
}

/// Debian description: synopsis line, then extended lines indented by one
/// space with blank lines as ` .`.
fn format_description(description: &str, fallback: &str) -> String {
    let description = description.trim();
    let mut lines = description.lines();
    let synopsis = match lines.next() {
        Some(line) if !line.trim().is_empty() => line.trim(),
        _ => fallback,
    };

    let mut out = format!("Description: {}\n", synopsis);
    for line in lines {
        if line.trim().is_empty() {
            out.push_str(" .\n");
        } else {
            out.push(' ');
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
    out
}

/// Sum of regular file sizes outside the control directory, in KiB rounded up.
pub fn installed_size_kib(staging: &Path) -> Result<u64> {
    let control_dir = staging.join(CONTROL_DIR);
    let mut bytes = 0u64;

    let walker = WalkDir::new(staging)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.path() != control_dir);
    for entry in walker {
        let entry = entry.with_context(|| format!("walking {}", staging.display()))?;
        if entry.file_type().is_file() {
            bytes += entry
                .metadata()
                .with_context(|| format!("reading metadata {}", entry.path().display()))?
                .len();
        }
    }

    Ok(bytes.div_ceil(1024))
}
