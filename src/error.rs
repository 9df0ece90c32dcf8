//! Error types surfaced by the package build.
//!
//! Lower layers work with `anyhow::Result`; the orchestrator wraps whatever
//! failed into a single [`BuildError`] tagged with the step that stopped it.

use std::fmt;
use thiserror::Error;

/// An external tool ran but exited unsuccessfully.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("'{program}' failed (exit code {code}){}", detail(.stderr))]
    Failed {
        program: String,
        code: i32,
        stdout: String,
        stderr: String,
    },
}

fn detail(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(":\n{stderr}")
    }
}

/// Steps of a package build, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BuildStep {
    StageFiles,
    NormalizeFiles,
    Services,
    Starters,
    Control,
    Documentation,
    NormalizeDirectories,
    BuildPackage,
    CheckPackage,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStep::StageFiles => "staging application files",
            BuildStep::NormalizeFiles => "normalizing file permissions",
            BuildStep::Services => "generating service scripts",
            BuildStep::Starters => "generating desktop starters",
            BuildStep::Control => "writing control metadata",
            BuildStep::Documentation => "writing documentation",
            BuildStep::NormalizeDirectories => "normalizing directory permissions",
            BuildStep::BuildPackage => "building the package",
            BuildStep::CheckPackage => "checking the package",
        };
        f.write_str(name)
    }
}

/// The build stopped at `step`. Nothing is delivered to the destination
/// directory unless the package tool itself already ran.
#[derive(Debug, Error)]
#[error("package build failed while {step}")]
pub struct BuildError {
    pub step: BuildStep,
    #[source]
    pub source: anyhow::Error,
}

impl BuildError {
    /// The tool failure behind this error, if an external tool caused it.
    pub fn tool_error(&self) -> Option<&ToolError> {
        self.source.downcast_ref::<ToolError>()
    }
}

/// Attach a [`BuildStep`] to a fallible step result.
pub trait StepContext<T> {
    fn step(self, step: BuildStep) -> Result<T, BuildError>;
}

impl<T> StepContext<T> for anyhow::Result<T> {
    fn step(self, step: BuildStep) -> Result<T, BuildError> {
        self.map_err(|source| BuildError { step, source })
    }
}
