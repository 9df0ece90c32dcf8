//! Utilities for file operations with automatic parent directory creation.

use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Mode for staged regular files.
pub const FILE_MODE: u32 = 0o644;
/// Mode for staged executables and for every staged directory.
pub const EXEC_MODE: u32 = 0o755;

/// Write a file, creating parent directories as needed.
pub fn write_file_with_dirs<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write a file with specific Unix permissions, creating parent directories as needed.
///
/// # Arguments
/// * `path` - Path to the file to write
/// * `content` - Content to write
/// * `mode` - Unix permission bits (e.g., 0o644, 0o755)
pub fn write_file_mode<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
    mode: u32,
) -> Result<()> {
    let path = path.as_ref();
    write_file_with_dirs(path, content)?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("setting mode {:o} on {}", mode, path.display()))?;
    Ok(())
}

/// Create a file inside the staging tree.
///
/// `rel` is relative to `staging`. The file gets 0755 when `executable`,
/// otherwise 0644. Returns the full path.
pub fn create_file(
    staging: &Path,
    rel: &str,
    executable: bool,
    content: impl AsRef<[u8]>,
) -> Result<PathBuf> {
    let path = staging.join(rel);
    let mode = if executable { EXEC_MODE } else { FILE_MODE };
    write_file_mode(&path, content, mode)?;
    tracing::debug!("created {} ({:o})", rel, mode);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_write_file_with_dirs_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c.txt");

        write_file_with_dirs(&path, "content").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_create_file_executable() {
        let temp = TempDir::new().unwrap();

        let path = create_file(temp.path(), "usr/bin/tool", true, "#!/bin/sh\n").unwrap();

        assert_eq!(path, temp.path().join("usr/bin/tool"));
        assert_eq!(mode_of(&path), 0o755);
    }

    #[test]
    fn test_create_file_regular() {
        let temp = TempDir::new().unwrap();

        let path = create_file(temp.path(), "usr/share/doc/x/copyright", false, "c").unwrap();

        assert_eq!(mode_of(&path), 0o644);
    }

    #[test]
    fn test_create_file_overwrites() {
        let temp = TempDir::new().unwrap();

        create_file(temp.path(), "etc/init.d/svc", true, "first").unwrap();
        let path = create_file(temp.path(), "etc/init.d/svc", true, "second").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }
}
