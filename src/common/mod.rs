//! Shared utilities across debforge modules.

pub mod files;
pub mod temp;

pub use files::{create_file, write_file_mode, write_file_with_dirs};
pub use temp::{cleanup_work_dir, prepare_work_dir};
