//! Build context shared across all build modules.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::manifest::Manifest;

/// Shared context for one package build.
pub struct BuildContext<'a> {
    /// What is being packaged.
    pub manifest: &'a Manifest,
    /// Root of the staging tree; becomes `/` on the target system.
    pub staging: PathBuf,
    /// Runtime command used by launchers and init scripts.
    pub java: String,
}

impl<'a> BuildContext<'a> {
    /// Create a new build context.
    ///
    /// # Arguments
    /// * `manifest` - The resolved package manifest
    /// * `config` - Host configuration (staging dir, runtime command)
    pub fn new(manifest: &'a Manifest, config: &Config) -> Self {
        Self {
            manifest,
            staging: config.staging_dir.clone(),
            java: config.java.clone(),
        }
    }

    /// Create a build context for testing with a custom staging path.
    #[doc(hidden)]
    pub fn for_testing(manifest: &'a Manifest, staging: &Path) -> Self {
        Self {
            manifest,
            staging: staging.to_path_buf(),
            java: "java".to_string(),
        }
    }

    /// `usr/share/<base_name>`, where application files are staged.
    pub fn files_dir(&self) -> PathBuf {
        self.staging
            .join("usr/share")
            .join(self.manifest.package.base_name())
    }

    /// `usr/share/doc/<base_name>`.
    pub fn doc_dir(&self) -> PathBuf {
        self.staging
            .join("usr/share/doc")
            .join(self.manifest.package.base_name())
    }
}
