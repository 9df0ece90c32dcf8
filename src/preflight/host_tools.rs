//! Host tool availability checks.

use crate::config::{check_enabled, Config};
use crate::manifest::Manifest;
use crate::process;

use super::types::CheckResult;

/// Check that the configured packaging tools are installed.
///
/// The lint tool is only required when the manifest (or config) leaves
/// package checking enabled.
pub fn check_host_tools(config: &Config, manifest: Option<&Manifest>) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if let Some(wrapper) = &config.privilege_wrapper {
        results.push(check_tool_exists(
            wrapper,
            "fakeroot",
            "Required to build packages with root ownership",
            true,
        ));
    }

    results.push(check_tool_exists(
        &config.package_tool,
        "dpkg",
        "Required to create the package archive",
        true,
    ));

    let lint_required = check_enabled(
        config.check_package_option(manifest.and_then(|m| m.package.check_package.as_deref())),
    );
    results.push(check_tool_exists(
        &config.lint_tool,
        "lintian",
        "Required when check_package is unset or \"true\"",
        lint_required,
    ));

    results
}

/// Check if a tool exists in PATH.
fn check_tool_exists(tool: &str, package: &str, purpose: &str, required: bool) -> CheckResult {
    match process::which(tool) {
        Some(path) => CheckResult::pass_with(tool, &path),
        None => {
            let msg = format!("Not found. Install '{}' package. {}", package, purpose);
            if required {
                CheckResult::fail(tool, &msg)
            } else {
                CheckResult::warn(tool, &msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preflight::CheckStatus;
    use std::collections::HashMap;
    use std::path::Path;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(&vars, Path::new("/"))
    }

    #[test]
    fn test_present_tool_passes() {
        let results = check_host_tools(
            &config(&[
                ("DEBFORGE_PRIVILEGE_WRAPPER", ""),
                ("DEBFORGE_PACKAGE_TOOL", "sh"),
                ("DEBFORGE_LINT_TOOL", "sh"),
            ]),
            None,
        );
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.status == CheckStatus::Pass));
    }

    #[test]
    fn test_missing_lint_tool_is_warning_when_disabled() {
        let results = check_host_tools(
            &config(&[
                ("DEBFORGE_PRIVILEGE_WRAPPER", "sh"),
                ("DEBFORGE_PACKAGE_TOOL", "sh"),
                ("DEBFORGE_LINT_TOOL", "no_such_lint_tool_12345"),
                ("DEBFORGE_CHECK_PACKAGE", "false"),
            ]),
            None,
        );
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].status, CheckStatus::Warn);
    }

    #[test]
    fn test_missing_package_tool_fails() {
        let results = check_host_tools(
            &config(&[
                ("DEBFORGE_PRIVILEGE_WRAPPER", ""),
                ("DEBFORGE_PACKAGE_TOOL", "no_such_package_tool_12345"),
            ]),
            None,
        );
        assert_eq!(results[0].status, CheckStatus::Fail);
    }
}
