//! Ctrl-C handling.
//!
//! The handler only raises a flag. Child tools share our process group and
//! receive the signal themselves, so a running step fails on its own; the
//! orchestrators check the flag between steps and unwind normally, which
//! lets the workspace and mount guards clean up. A second Ctrl-C exits
//! immediately.

use super::error::Interrupted;
use log::debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Exit status used when the user cancels (128 + SIGINT)
pub const INTERRUPTED_EXIT_CODE: u8 = 130;

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the process-wide Ctrl-C handler
    pub fn install() -> Result<Self, ctrlc::Error> {
        let interrupt = Self::new();
        let flag = interrupt.flag.clone();

        ctrlc::set_handler(move || {
            if flag.swap(true, Ordering::SeqCst) {
                std::process::exit(i32::from(INTERRUPTED_EXIT_CODE));
            }
        })?;

        debug!("Installed Ctrl-C handler");
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Fail with [`Interrupted`] once the flag is raised
    pub fn check(&self) -> Result<(), Interrupted> {
        if self.is_set() {
            Err(Interrupted)
        } else {
            Ok(())
        }
    }
}
