//! Package manifest: what goes into the package.
//!
//! The manifest is a TOML document, usually `debforge.toml`:
//!
//! ```toml
//! [package]
//! application = "My App"
//! version = "1.2.0"
//! main_jar = "myapp.jar"
//! main_class = "com.example.Main"
//! source_dir = "build/dist"
//!
//! [[services]]
//! name = "My Daemon"
//! description = "Runs things"
//!
//! [[starters]]
//! name = "My App"
//! description = "Desktop client"
//! ```
//!
//! Relative paths resolve against the manifest's directory. Descriptors are
//! immutable once loaded.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Derive the name used for every generated path of a service or starter.
///
/// Lowercases and replaces spaces with hyphens. Idempotent.
pub fn unix_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Package-level settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Package {
    /// Display name of the application.
    pub application: String,
    #[serde(default)]
    base_name: Option<String>,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub maintainer: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default = "default_section")]
    pub section: String,
    #[serde(default = "default_priority")]
    pub priority: String,
    #[serde(default = "default_architecture")]
    pub architecture: String,
    #[serde(default)]
    pub depends: Option<String>,
    /// Default jar for services and starters that don't name one.
    #[serde(default)]
    pub main_jar: Option<String>,
    /// Default main class for services and starters that don't name one.
    #[serde(default)]
    pub main_class: Option<String>,
    /// Application files staged under `usr/share/<base_name>`.
    #[serde(default)]
    pub source_dir: Option<PathBuf>,
    /// Paths relative to `source_dir` that keep the executable bit.
    #[serde(default)]
    pub executables: Vec<String>,
    #[serde(default)]
    pub license_file: Option<PathBuf>,
    #[serde(default = "default_destination_dir")]
    pub destination_dir: PathBuf,
    #[serde(default)]
    setup_name: Option<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Unset or `"true"` runs the lint step; any other value skips it.
    #[serde(default)]
    pub check_package: Option<String>,
}

fn default_section() -> String {
    "java".to_string()
}

fn default_priority() -> String {
    "optional".to_string()
}

fn default_architecture() -> String {
    "all".to_string()
}

fn default_destination_dir() -> PathBuf {
    PathBuf::from("build/distributions")
}

fn default_extension() -> String {
    "deb".to_string()
}

impl Package {
    /// Package name; the unix name of the application unless set explicitly.
    pub fn base_name(&self) -> String {
        match &self.base_name {
            Some(name) => name.clone(),
            None => unix_name(&self.application),
        }
    }

    /// File stem of the built package.
    pub fn setup_name(&self) -> String {
        match &self.setup_name {
            Some(name) => name.clone(),
            None => format!("{}-{}", self.base_name(), self.version),
        }
    }

    /// `<setup_name>.<extension>`.
    pub fn package_file(&self) -> String {
        format!("{}.{}", self.setup_name(), self.extension)
    }

    /// Where application files live on the installed system.
    pub fn install_dir(&self) -> String {
        format!("/usr/share/{}", self.base_name())
    }
}

/// How a Java entry point is launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Launch {
    pub main_jar: String,
    pub main_class: String,
    pub start_arguments: String,
}

impl Launch {
    /// `-cp <install-dir>/<jar> <class> <args>` for the runtime.
    pub fn runtime_arguments(&self, package: &Package) -> String {
        let classpath = format!("{}/{}", package.install_dir(), self.main_jar);
        let mut parts = vec!["-cp", classpath.as_str(), self.main_class.as_str()];
        let args = self.start_arguments.trim();
        if !args.is_empty() {
            parts.push(args);
        }
        parts.join(" ")
    }
}

/// A background service started by an init script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: String,
    pub description: String,
    pub launch: Launch,
}

impl Service {
    pub fn unix_name(&self) -> String {
        unix_name(&self.name)
    }
}

/// A desktop menu entry with a launcher script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesktopStarter {
    pub name: String,
    pub description: String,
    pub launch: Launch,
}

impl DesktopStarter {
    pub fn unix_name(&self) -> String {
        unix_name(&self.name)
    }
}

/// A fully resolved manifest.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub package: Package,
    pub services: Vec<Service>,
    pub starters: Vec<DesktopStarter>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    package: Package,
    #[serde(default)]
    services: Vec<RawEntry>,
    #[serde(default)]
    starters: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    main_jar: Option<String>,
    #[serde(default)]
    main_class: Option<String>,
    #[serde(default)]
    start_arguments: String,
}

impl RawEntry {
    fn resolve(self, kind: &str, package: &Package) -> Result<(String, String, Launch)> {
        if self.name.trim().is_empty() {
            bail!("{} entry has an empty name", kind);
        }
        let main_jar = self
            .main_jar
            .or_else(|| package.main_jar.clone())
            .with_context(|| format!("{} '{}' has no main_jar", kind, self.name))?;
        let main_class = self
            .main_class
            .or_else(|| package.main_class.clone())
            .with_context(|| format!("{} '{}' has no main_class", kind, self.name))?;
        Ok((
            self.name,
            self.description,
            Launch {
                main_jar,
                main_class,
                start_arguments: self.start_arguments,
            },
        ))
    }
}

impl Manifest {
    /// Load and resolve a manifest file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading manifest {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&text, base_dir)
            .with_context(|| format!("invalid manifest {}", path.display()))
    }

    /// Parse a manifest, resolving relative paths against `base_dir`.
    pub fn parse(text: &str, base_dir: &Path) -> Result<Self> {
        let raw: RawManifest = toml::from_str(text)?;
        let mut package = raw.package;

        if package.application.trim().is_empty() {
            bail!("package.application must not be empty");
        }
        if package.version.trim().is_empty() {
            bail!("package.version must not be empty");
        }
        if package.base_name().is_empty() {
            bail!("package.base_name must not be empty");
        }

        package.source_dir = package.source_dir.map(|p| resolve(base_dir, p));
        package.license_file = package.license_file.map(|p| resolve(base_dir, p));
        package.destination_dir = resolve(base_dir, package.destination_dir);
        package.executables = package
            .executables
            .iter()
            .map(|entry| normalize_executable(entry))
            .collect::<Result<Vec<_>>>()?;

        let services = raw
            .services
            .into_iter()
            .map(|entry| {
                let (name, description, launch) = entry.resolve("service", &package)?;
                Ok(Service {
                    name,
                    description,
                    launch,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let starters = raw
            .starters
            .into_iter()
            .map(|entry| {
                let (name, description, launch) = entry.resolve("starter", &package)?;
                Ok(DesktopStarter {
                    name,
                    description,
                    launch,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            package,
            services,
            starters,
        })
    }
}

fn resolve(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

/// Canonical spelling of an `executables` entry: `./` segments dropped,
/// relative to `source_dir`, never escaping it.
fn normalize_executable(entry: &str) -> Result<String> {
    let mut parts = Vec::new();
    for component in Path::new(entry).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                bail!(
                    "executables entry '{}' must be a path inside source_dir",
                    entry
                )
            }
        }
    }
    if parts.is_empty() {
        bail!("executables entry '{}' names no file", entry);
    }
    Ok(parts.join("/"))
}
