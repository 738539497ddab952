//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod build;
pub mod find;
pub mod models;
pub mod status;

// Re-export main command functions
pub use build::{check_preconditions, execute_build};
pub use find::{execute_find, find_package_urls};
pub use models::{BuildArgs, BuildOutcome, FindArgs, FindOutcome, Precondition, Session};
pub use status::exit_status;
