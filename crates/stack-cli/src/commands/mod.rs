//! Command implementations for stack-cli

pub mod build;
pub mod list;
pub mod validate;

pub use build::{BuildOptions, BuildReport, run_build};
pub use list::run_list;
pub use validate::run_validate;
