//! Permission normalization for the staging tree.
//!
//! The staging umask must never leak into the package. Files get 0644 or
//! 0755, directories get 0755. Symlinks are left alone: their mode is
//! meaningless and chmod would follow them.

use anyhow::{bail, Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::files::{EXEC_MODE, FILE_MODE};

/// Set every regular file below `root` to 0644, except those listed in
/// `executables` (relative to `root`), which get 0755.
///
/// A listed path that is not a regular file under `root` is an error.
/// Directories are not touched here.
pub fn normalize_files(root: &Path, executables: &[String]) -> Result<usize> {
    let mut pending: BTreeSet<PathBuf> = executables.iter().map(PathBuf::from).collect();
    let mut count = 0;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let mode = if pending.remove(rel) {
            EXEC_MODE
        } else {
            FILE_MODE
        };
        set_mode(entry.path(), mode)?;
        count += 1;
    }

    if !pending.is_empty() {
        let missing: Vec<String> = pending
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        bail!(
            "declared executables not found as regular files under {}: {}",
            root.display(),
            missing.join(", ")
        );
    }

    tracing::debug!("normalized {} files under {}", count, root.display());
    Ok(count)
}

/// Set every directory below `root`, and `root` itself, to 0755.
///
/// Runs after all generators so directories they create are covered too.
pub fn normalize_directories(root: &Path) -> Result<usize> {
    let mut count = 0;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if entry.file_type().is_dir() {
            set_mode(entry.path(), EXEC_MODE)?;
            count += 1;
        }
    }

    tracing::debug!("normalized {} directories under {}", count, root.display());
    Ok(count)
}

fn set_mode(path: &Path, mode: u32) -> Result<()> {
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("chmod {:o} {}", mode, path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mode_of(path: &Path) -> u32 {
        fs::symlink_metadata(path).unwrap().permissions().mode() & 0o777
    }

    fn chmod(path: &Path, mode: u32) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_normalize_files_strips_exec_bits() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("lib/nested")).unwrap();
        fs::write(root.join("app.jar"), "jar").unwrap();
        fs::write(root.join("lib/nested/dep.jar"), "dep").unwrap();
        chmod(&root.join("app.jar"), 0o777);
        chmod(&root.join("lib/nested/dep.jar"), 0o600);

        let count = normalize_files(root, &[]).unwrap();

        assert_eq!(count, 2);
        assert_eq!(mode_of(&root.join("app.jar")), 0o644);
        assert_eq!(mode_of(&root.join("lib/nested/dep.jar")), 0o644);
    }

    #[test]
    fn test_normalize_files_keeps_declared_executables() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin/run.sh"), "#!/bin/sh\n").unwrap();
        fs::write(root.join("bin/notes.txt"), "x").unwrap();
        chmod(&root.join("bin/run.sh"), 0o600);
        chmod(&root.join("bin/notes.txt"), 0o755);

        normalize_files(root, &["bin/run.sh".to_string()]).unwrap();

        assert_eq!(mode_of(&root.join("bin/run.sh")), 0o755);
        assert_eq!(mode_of(&root.join("bin/notes.txt")), 0o644);
    }

    #[test]
    fn test_normalize_files_rejects_unmatched_executables() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("bin")).unwrap();
        fs::write(root.join("bin/run.sh"), "#!/bin/sh\n").unwrap();

        let err = normalize_files(
            root,
            &["bin/run.sh".to_string(), "bin/missing.sh".to_string()],
        )
        .unwrap_err();

        assert!(err.to_string().contains("bin/missing.sh"));
        assert!(!err.to_string().contains("bin/run.sh"));
    }

    #[test]
    fn test_normalize_files_leaves_directories() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let dir = root.join("private");
        fs::create_dir_all(&dir).unwrap();
        chmod(&dir, 0o700);

        normalize_files(root, &[]).unwrap();

        assert_eq!(mode_of(&dir), 0o700);
    }

    #[test]
    fn test_normalize_files_skips_symlinks() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("target"), "t").unwrap();
        std::os::unix::fs::symlink("target", root.join("link")).unwrap();

        let count = normalize_files(root, &[]).unwrap();

        assert_eq!(count, 1);
        assert!(root.join("link").is_symlink());
    }

    #[test]
    fn test_normalize_directories_recursive_including_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("staging");
        fs::create_dir_all(root.join("usr/share/doc/app")).unwrap();
        fs::create_dir_all(root.join("etc/init.d")).unwrap();
        fs::write(root.join("etc/init.d/svc"), "").unwrap();
        chmod(&root.join("etc/init.d/svc"), 0o755);
        chmod(&root.join("usr/share/doc/app"), 0o700);
        chmod(&root.join("usr/share/doc"), 0o750);
        chmod(&root, 0o700);

        let count = normalize_directories(&root).unwrap();

        assert_eq!(count, 7);
        for dir in ["", "usr", "usr/share", "usr/share/doc", "usr/share/doc/app", "etc", "etc/init.d"] {
            assert_eq!(mode_of(&root.join(dir)), 0o755, "{} should be 0755", dir);
        }
        assert_eq!(mode_of(&root.join("etc/init.d/svc")), 0o755);
    }

    #[test]
    fn test_missing_root_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(normalize_directories(&temp.path().join("missing")).is_err());
        assert!(normalize_files(&temp.path().join("missing"), &[]).is_err());
    }
}
