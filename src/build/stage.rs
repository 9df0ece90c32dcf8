//! Copies the application files into the staging tree.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy `source` recursively into `dest`, recreating symlinks.
///
/// Returns the staged regular files, relative to `dest`.
pub fn stage_files(source: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    if !source.is_dir() {
        bail!("application source directory not found: {}", source.display());
    }

    fs::create_dir_all(dest).with_context(|| format!("creating {}", dest.display()))?;
    let mut staged = Vec::new();

    for entry in WalkDir::new(source).follow_links(false).min_depth(1) {
        let entry = entry.with_context(|| format!("walking {}", source.display()))?;
        let rel = entry
            .path()
            .strip_prefix(source)
            .context("walkdir yielded a path outside the source")?;
        let target = dest.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("creating {}", target.display()))?;
        } else if file_type.is_symlink() {
            let link = fs::read_link(entry.path())?;
            if target.is_symlink() || target.exists() {
                fs::remove_file(&target)?;
            }
            std::os::unix::fs::symlink(&link, &target)
                .with_context(|| format!("linking {}", target.display()))?;
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "copying {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
            staged.push(rel.to_path_buf());
        }
    }

    tracing::info!("staged {} files into {}", staged.len(), dest.display());
    Ok(staged)
}
