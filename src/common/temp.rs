//! Utilities for managing scratch work directories.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Prepare a work directory, removing it if it exists and creating it fresh.
///
/// Every package build starts from an empty staging tree; nothing is reused
/// from a previous run.
pub fn prepare_work_dir(work_dir: &Path) -> Result<()> {
    if work_dir.exists() {
        fs::remove_dir_all(work_dir)
            .with_context(|| format!("removing stale {}", work_dir.display()))?;
    }

    fs::create_dir_all(work_dir).with_context(|| format!("creating {}", work_dir.display()))?;

    Ok(())
}

/// Remove a work directory and everything below it.
///
/// Idempotent: a missing directory is not an error.
pub fn cleanup_work_dir(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prepare_work_dir_discards_previous_contents() {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("staging");
        fs::create_dir_all(work.join("usr/share/old")).unwrap();
        fs::write(work.join("usr/share/old/file"), "stale").unwrap();

        prepare_work_dir(&work).unwrap();

        assert!(work.is_dir());
        assert_eq!(fs::read_dir(&work).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_work_dir_idempotent() {
        let temp = TempDir::new().unwrap();
        let work = temp.path().join("gone");
        fs::create_dir_all(&work).unwrap();

        cleanup_work_dir(&work).unwrap();
        cleanup_work_dir(&work).unwrap();

        assert!(!work.exists());
    }

    #[test]
    fn test_cleanup_work_dir_reports_failure() {
        let temp = TempDir::new().unwrap();
        let not_a_dir = temp.path().join("staging");
        fs::write(&not_a_dir, "file, not a directory").unwrap();

        let err = cleanup_work_dir(&not_a_dir).unwrap_err();

        assert!(err.to_string().contains("removing"));
        assert!(not_a_dir.exists());
    }
}
