//! Manifest input checks: files the build will read must exist.

use std::collections::HashMap;

use crate::manifest::Manifest;

use super::types::CheckResult;

pub fn check_inputs(manifest: &Manifest) -> Vec<CheckResult> {
    let package = &manifest.package;
    let mut results = Vec::new();

    match &package.source_dir {
        Some(dir) if dir.is_dir() => {
            results.push(CheckResult::pass_with("source_dir", &dir.display().to_string()));
            for exe in &package.executables {
                if !dir.join(exe).is_file() {
                    results.push(CheckResult::fail(
                        "executables",
                        &format!("{} is not a file in {}", exe, dir.display()),
                    ));
                }
            }
        }
        Some(dir) => results.push(CheckResult::fail(
            "source_dir",
            &format!("{} does not exist", dir.display()),
        )),
        None => results.push(CheckResult::warn(
            "source_dir",
            "Not set - the package will contain no application files",
        )),
    }

    if let Some(file) = &package.license_file {
        if file.is_file() {
            results.push(CheckResult::pass("license_file"));
        } else {
            results.push(CheckResult::fail(
                "license_file",
                &format!("{} does not exist", file.display()),
            ));
        }
    }

    // Colliding unix names overwrite each other's files.
    let mut seen: HashMap<String, &str> = HashMap::new();
    let names = manifest
        .services
        .iter()
        .map(|s| ("service", s.unix_name(), s.name.as_str()))
        .chain(
            manifest
                .starters
                .iter()
                .map(|s| ("starter", s.unix_name(), s.name.as_str())),
        );
    for (kind, unix_name, name) in names {
        let key = format!("{}:{}", kind, unix_name);
        if let Some(previous) = seen.insert(key, name) {
            results.push(CheckResult::warn(
                kind,
                &format!("'{}' and '{}' both map to '{}'", previous, name, unix_name),
            ));
        }
    }

    results
}
