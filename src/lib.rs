//! Debforge library exports for testing.
//!
//! This module exposes internal components for integration testing.

pub mod artifact;
pub mod build;
pub mod common;
pub mod config;
pub mod error;
pub mod manifest;
pub mod preflight;
pub mod process;
pub mod template;
pub mod timing;

pub use build::PackageAssembler;
pub use error::{BuildError, BuildStep, ToolError};
pub use manifest::Manifest;
