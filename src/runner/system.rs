//! [`CommandRunner`] backed by real processes.

use super::{CommandRunner, Invocation};
use crate::utils::error::CommandError;
use log::debug;
use std::process::Command;

/// Spawns tools with `std::process::Command` and waits for them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<Vec<u8>, CommandError> {
        debug!("Running: {}", invocation);

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .output()
            .map_err(|source| CommandError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CommandError::Failed {
                program: invocation.program.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(
            "{} exited successfully ({} bytes of output)",
            invocation.program,
            output.stdout.len()
        );

        Ok(output.stdout)
    }
}
