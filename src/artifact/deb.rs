//! Debian archive creation and linting.
//!
//! Wraps `fakeroot dpkg-deb --build` and `lintian`. Arguments are passed
//! literally; nothing goes through a shell.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::error::ToolError;
use crate::process::{CommandResult, CommandRunner};

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Run through `runner`; a non-zero exit becomes [`ToolError::Failed`].
    pub fn run(&self, runner: &dyn CommandRunner) -> Result<CommandResult> {
        let result = runner.run(&self.program, &self.args)?;
        if !result.success() {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                code: result.code(),
                stdout: result.stdout,
                stderr: result.stderr,
            }
            .into());
        }
        Ok(result)
    }
}

/// `<wrapper> <package-tool> --build <staging> <package>`.
pub fn build_invocation(config: &Config, staging: &Path, package: &Path) -> Invocation {
    let mut parts: Vec<String> = Vec::new();
    if let Some(wrapper) = &config.privilege_wrapper {
        parts.push(wrapper.clone());
    }
    parts.push(config.package_tool.clone());
    parts.push("--build".to_string());
    parts.push(staging.to_string_lossy().into_owned());
    parts.push(package.to_string_lossy().into_owned());

    let program = parts.remove(0);
    Invocation {
        program,
        args: parts,
    }
}

/// `<lint-tool> <package>`.
pub fn check_invocation(config: &Config, package: &Path) -> Invocation {
    Invocation {
        program: config.lint_tool.clone(),
        args: vec![package.to_string_lossy().into_owned()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::os::unix::process::ExitStatusExt;
    use std::process::ExitStatus;

    struct Exit(i32);

    impl CommandRunner for Exit {
        fn run(&self, _program: &str, _args: &[String]) -> Result<CommandResult> {
            Ok(CommandResult {
                status: ExitStatus::from_raw(self.0 << 8),
                stdout: "out".into(),
                stderr: "err".into(),
            })
        }
    }

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(&vars, Path::new("/work"))
    }

    #[test]
    fn test_build_invocation_with_wrapper() {
        let inv = build_invocation(
            &config(&[]),
            Path::new("/work/stage"),
            Path::new("/out/app-1.0.deb"),
        );
        assert_eq!(inv.program, "fakeroot");
        assert_eq!(
            inv.args,
            ["dpkg-deb", "--build", "/work/stage", "/out/app-1.0.deb"]
        );
    }

    #[test]
    fn test_build_invocation_without_wrapper() {
        let inv = build_invocation(
            &config(&[("DEBFORGE_PRIVILEGE_WRAPPER", "")]),
            Path::new("/s"),
            Path::new("/o.deb"),
        );
        assert_eq!(inv.program, "dpkg-deb");
        assert_eq!(inv.args, ["--build", "/s", "/o.deb"]);
    }

    #[test]
    fn test_check_invocation() {
        let inv = check_invocation(&config(&[]), Path::new("/out/app.deb"));
        assert_eq!(inv.program, "lintian");
        assert_eq!(inv.args, ["/out/app.deb"]);
    }

    #[test]
    fn test_non_zero_exit_is_tool_error() {
        let inv = check_invocation(&config(&[]), Path::new("/x.deb"));

        let err = inv.run(&Exit(2)).unwrap_err();

        match err.downcast_ref::<ToolError>() {
            Some(ToolError::Failed {
                program,
                code,
                stderr,
                ..
            }) => {
                assert_eq!(program, "lintian");
                assert_eq!(*code, 2);
                assert_eq!(stderr, "err");
            }
            None => panic!("expected ToolError, got {err:#}"),
        }
    }

    #[test]
    fn test_zero_exit_passes_output_through() {
        let inv = check_invocation(&config(&[]), Path::new("/x.deb"));
        let result = inv.run(&Exit(0)).unwrap();
        assert_eq!(result.stdout, "out");
    }
}
