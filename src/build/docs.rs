//! Package documentation under `usr/share/doc/<base_name>`.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::common::create_file;
use crate::manifest::Package;

/// Writes the machine-readable `copyright` file.
pub struct DocumentationBuilder<'a> {
    package: &'a Package,
    doc_dir: PathBuf,
}

impl<'a> DocumentationBuilder<'a> {
    pub fn new(package: &'a Package, doc_dir: PathBuf) -> Self {
        Self { package, doc_dir }
    }

    pub fn build(&self) -> Result<PathBuf> {
        let content = self.render_copyright()?;
        let path = create_file(&self.doc_dir, "copyright", false, content)?;
        tracing::info!("documentation written to {}", self.doc_dir.display());
        Ok(path)
    }

    fn render_copyright(&self) -> Result<String> {
        let package = self.package;
        let holder = package
            .vendor
            .as_deref()
            .or(package.maintainer.as_deref())
            .unwrap_or(&package.application);

        let mut out = String::from(
            "Format: https://www.debian.org/doc/packaging-manuals/copyright-format/1.0/\n",
        );
        out.push_str(&format!("Upstream-Name: {}\n", package.application));
        if let Some(maintainer) = &package.maintainer {
            out.push_str(&format!("Upstream-Contact: {}\n", maintainer));
        }
        if let Some(homepage) = &package.homepage {
            out.push_str(&format!("Source: {}\n", homepage));
        }
        out.push_str("\nFiles: *\n");
        out.push_str(&format!("Copyright: {}\n", holder));

        match &package.license_file {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading license file {}", path.display()))?;
                let mut lines = text.trim_end().lines();
                let first = lines.next().unwrap_or("").trim();
                out.push_str(&format!("License: {}\n", first));
                for line in lines {
                    if line.trim().is_empty() {
                        out.push_str(" .\n");
                    } else {
                        out.push(' ');
                        out.push_str(line.trim_end());
                        out.push('\n');
                    }
                }
            }
            None => out.push_str("License: other\n"),
        }

        Ok(out)
    }
}
