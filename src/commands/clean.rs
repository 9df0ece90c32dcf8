//! Clean command - removes the staging tree.

use anyhow::{Context, Result};

use debforge::common::cleanup_work_dir;
use debforge::config::Config;

/// Execute the clean command.
///
/// Built packages in the destination directory are left alone.
pub fn cmd_clean(config: &Config) -> Result<()> {
    let staging = &config.staging_dir;
    if staging.exists() {
        println!("Removing {}...", staging.display());
        cleanup_work_dir(staging)
            .with_context(|| format!("cleaning staging directory {}", staging.display()))?;
        println!("Staging directory removed.");
    } else {
        println!("Nothing to clean ({} does not exist).", staging.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(staging: &std::path::Path) -> Config {
        let mut vars = HashMap::new();
        vars.insert(
            "DEBFORGE_STAGING_DIR".to_string(),
            staging.to_string_lossy().into_owned(),
        );
        Config::from_vars(&vars, staging)
    }

    #[test]
    fn test_clean_removes_staging() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("staging");
        fs::create_dir_all(staging.join("DEBIAN")).unwrap();

        cmd_clean(&config_for(&staging)).unwrap();

        assert!(!staging.exists());
    }

    #[test]
    fn test_clean_propagates_removal_failure() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("staging");
        fs::write(&staging, "not a directory").unwrap();

        let err = cmd_clean(&config_for(&staging)).unwrap_err();

        assert!(format!("{:#}", err).contains("cleaning staging directory"));
    }
}
