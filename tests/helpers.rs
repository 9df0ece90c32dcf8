//! Shared test utilities for debforge tests.

#![allow(dead_code)]

use debforge::config::Config;
use debforge::process::{CommandResult, CommandRunner};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::TempDir;

/// Test environment with a project directory and a staging directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Project root: manifest and application sources live here
    pub project: PathBuf,
    /// Staging directory used by the build
    pub staging: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let project = temp_dir.path().join("project");
        let staging = temp_dir.path().join("staging");
        fs::create_dir_all(&project).expect("Failed to create project dir");

        Self {
            _temp_dir: temp_dir,
            project,
            staging,
        }
    }

    /// Config pointing at this environment's staging dir, plus `extra` vars.
    pub fn config(&self, extra: &[(&str, &str)]) -> Config {
        let mut vars: HashMap<String, String> = HashMap::new();
        vars.insert(
            "DEBFORGE_STAGING_DIR".to_string(),
            self.staging.to_string_lossy().into_owned(),
        );
        for (k, v) in extra {
            vars.insert(k.to_string(), v.to_string());
        }
        Config::from_vars(&vars, &self.project)
    }

    /// Populate `project/dist` with a small application.
    pub fn create_app_sources(&self) {
        let dist = self.project.join("dist");
        write_with_mode(&dist.join("myapp.jar"), "jar", 0o777);
        write_with_mode(&dist.join("lib/dep.jar"), "dependency", 0o600);
        write_with_mode(&dist.join("bin/run.sh"), "#!/bin/sh\n", 0o640);
    }

    pub fn staged(&self, rel: &str) -> PathBuf {
        self.staging.join(rel)
    }
}

pub fn write_with_mode(path: &Path, content: &str, mode: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, content).expect("Failed to write file");
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).expect("Failed to chmod");
}

pub fn mode_of(path: &Path) -> u32 {
    fs::symlink_metadata(path)
        .unwrap_or_else(|_| panic!("Failed to stat {}", path.display()))
        .permissions()
        .mode()
        & 0o777
}

/// One recorded external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
}

/// Records invocations and answers with scripted exit codes.
///
/// Programs without a scripted code exit 0.
#[derive(Default)]
pub struct FakeRunner {
    pub calls: RefCell<Vec<Call>>,
    exit_codes: HashMap<String, i32>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(program: &str, code: i32) -> Self {
        let mut runner = Self::default();
        runner.exit_codes.insert(program.to_string(), code);
        runner
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.program.clone()).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, program: &str, args: &[String]) -> anyhow::Result<CommandResult> {
        self.calls.borrow_mut().push(Call {
            program: program.to_string(),
            args: args.to_vec(),
        });
        let code = self.exit_codes.get(program).copied().unwrap_or(0);
        Ok(CommandResult {
            status: ExitStatus::from_raw(code << 8),
            stdout: String::new(),
            stderr: if code == 0 {
                String::new()
            } else {
                format!("{} exploded", program)
            },
        })
    }
}

/// Assert that a file contains expected content.
pub fn assert_file_contains(path: &Path, expected: &str) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to read file: {}", path.display()));
    assert!(
        content.contains(expected),
        "File {} does not contain expected content.\nExpected to find: {}\nActual content: {}",
        path.display(),
        expected,
        content
    );
}

/// Assert that a file exists.
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "Expected file to exist: {}", path.display());
}
