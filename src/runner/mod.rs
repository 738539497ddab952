//! External tool execution.
//!
//! Every tool the build and find operations drive (`system_profiler`,
//! `pkgutil`, `tar`, `hdiutil`) goes through the [`CommandRunner`] trait so
//! tests can substitute fakes for exit codes and captured output.

pub mod invocation;
pub mod system;

// Re-export main types
pub use invocation::Invocation;
pub use system::SystemRunner;

use crate::utils::error::CommandError;

/// Runs an external program to completion.
pub trait CommandRunner {
    /// Run `invocation`, returning its standard output.
    ///
    /// A non-zero exit status is an error carrying the tool's stderr.
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, CommandError>;
}
