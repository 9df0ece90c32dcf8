//! Build modules for assembling a Debian package.
//!
//! - `context`: BuildContext for paths during build
//! - `stage`: copying application files into the staging tree
//! - `permissions`: file and directory mode normalization
//! - `control`: control metadata and maintainer script accumulation
//! - `service`: init scripts for background services
//! - `starter`: launchers and desktop entries
//! - `docs`: package documentation
//! - `assembler`: the end-to-end build sequence

pub mod assembler;
pub mod context;
pub mod control;
pub mod docs;
pub mod permissions;
pub mod service;
pub mod stage;
pub mod starter;

// Re-export commonly used items
pub use assembler::PackageAssembler;
pub use context::BuildContext;
pub use control::{ControlBuilder, Script};
