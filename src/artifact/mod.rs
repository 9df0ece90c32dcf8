//! Final artifact creation.
//!
//! - `deb`: archive build and lint invocations
//!
//! The staging tree is assembled by `crate::build`; this module only hands
//! it to the external tools.

pub mod deb;
