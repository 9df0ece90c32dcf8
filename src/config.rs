//! Host configuration for debforge.
//!
//! Reads configuration from environment variables, after `main` has loaded
//! a `.env` file with dotenvy. Environment variables take precedence over
//! `.env`. The manifest says what to package; this says how to run the
//! host tools.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default staging directory, relative to the working directory.
pub const DEFAULT_STAGING_DIR: &str = "build/deb-staging";

/// Debforge configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Scratch staging tree, wiped at the start of every build.
    pub staging_dir: PathBuf,
    /// Runs the package tool with fake root ownership. `None` runs it directly.
    pub privilege_wrapper: Option<String>,
    /// Archive builder (`dpkg-deb`).
    pub package_tool: String,
    /// Package checker (`lintian`).
    pub lint_tool: String,
    /// Runtime command used by launchers and init scripts.
    pub java: String,
    /// Overrides the manifest's `check_package` when set.
    pub check_package: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load(work_dir: &Path) -> Self {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars, work_dir)
    }

    /// Build config from a variable map, applying defaults.
    pub fn from_vars(vars: &HashMap<String, String>, work_dir: &Path) -> Self {
        let staging_dir = vars
            .get("DEBFORGE_STAGING_DIR")
            .map(|s| {
                let path = PathBuf::from(s);
                if path.is_absolute() {
                    path
                } else {
                    work_dir.join(path)
                }
            })
            .unwrap_or_else(|| work_dir.join(DEFAULT_STAGING_DIR));

        // Set-but-empty disables the wrapper.
        let privilege_wrapper = match vars.get("DEBFORGE_PRIVILEGE_WRAPPER") {
            Some(s) if s.trim().is_empty() => None,
            Some(s) => Some(s.clone()),
            None => Some("fakeroot".to_string()),
        };

        let package_tool = vars
            .get("DEBFORGE_PACKAGE_TOOL")
            .cloned()
            .unwrap_or_else(|| "dpkg-deb".to_string());

        let lint_tool = vars
            .get("DEBFORGE_LINT_TOOL")
            .cloned()
            .unwrap_or_else(|| "lintian".to_string());

        let java = vars
            .get("DEBFORGE_JAVA")
            .cloned()
            .unwrap_or_else(|| "java".to_string());

        let check_package = vars.get("DEBFORGE_CHECK_PACKAGE").cloned();

        Self {
            staging_dir,
            privilege_wrapper,
            package_tool,
            lint_tool,
            java,
            check_package,
        }
    }

    /// Effective check-package value: config override first, then manifest.
    pub fn check_package_option<'a>(&'a self, manifest_value: Option<&'a str>) -> Option<&'a str> {
        self.check_package.as_deref().or(manifest_value)
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  DEBFORGE_STAGING_DIR: {}", self.staging_dir.display());
        println!(
            "  DEBFORGE_PRIVILEGE_WRAPPER: {}",
            self.privilege_wrapper.as_deref().unwrap_or("(none)")
        );
        println!("  DEBFORGE_PACKAGE_TOOL: {}", self.package_tool);
        println!("  DEBFORGE_LINT_TOOL: {}", self.lint_tool);
        println!("  DEBFORGE_JAVA: {}", self.java);
        println!(
            "  DEBFORGE_CHECK_PACKAGE: {}",
            self.check_package.as_deref().unwrap_or("(manifest)")
        );
    }
}

/// Whether the lint step runs for a given "check package" option.
///
/// Absent or `true` (any case) runs it; any other value, empty included,
/// skips it.
pub fn check_enabled(option: Option<&str>) -> bool {
    match option {
        None => true,
        Some(value) => value.trim().eq_ignore_ascii_case("true"),
    }
}
