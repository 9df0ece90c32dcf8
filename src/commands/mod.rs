//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `build` - Assemble and build the package
//! - `clean` - Remove the staging tree
//! - `show` - Display configuration and planned layout
//! - `preflight` - Run preflight checks

pub mod build;
pub mod clean;
mod preflight;
pub mod show;

pub use build::cmd_build;
pub use clean::cmd_clean;
pub use preflight::cmd_preflight;
pub use show::cmd_show;
