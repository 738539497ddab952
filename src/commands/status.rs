//! Mapping command results to process exit status.

use crate::output::Console;
use crate::utils::error::Interrupted;
use crate::utils::interrupt::{Interrupt, INTERRUPTED_EXIT_CODE};
use anyhow::Result;
use log::debug;

/// Exit status for a command result.
///
/// Errors caused by Ctrl-C become [`INTERRUPTED_EXIT_CODE`] with a
/// cancellation notice; any other error is passed through for `main` to
/// report.
pub fn exit_status(
    result: Result<u8>,
    interrupt: &Interrupt,
    console: &dyn Console,
) -> Result<u8> {
    match result {
        Ok(code) => Ok(code),
        Err(err) if interrupt.is_set() || err.is::<Interrupted>() => {
            debug!("Stopped after interrupt: {:#}", err);
            console.warning("User cancelled operation");
            Ok(INTERRUPTED_EXIT_CODE)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Status;
    use anyhow::anyhow;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Lines(RefCell<Vec<(Status, String)>>);

    impl Console for Lines {
        fn emit(&self, status: Status, message: &str) {
            self.0.borrow_mut().push((status, message.to_string()));
        }
    }

    #[test]
    fn test_outcome_codes_pass_through() {
        let console = Lines::default();
        let interrupt = Interrupt::new();

        assert_eq!(exit_status(Ok(0), &interrupt, &console).unwrap(), 0);
        assert_eq!(exit_status(Ok(1), &interrupt, &console).unwrap(), 1);
        assert!(console.0.borrow().is_empty());
    }

    #[test]
    fn test_interrupted_error_is_cancellation() {
        let console = Lines::default();

        let code = exit_status(Err(Interrupted.into()), &Interrupt::new(), &console).unwrap();

        assert_eq!(code, 130);
        assert_eq!(
            *console.0.borrow(),
            vec![(Status::Warning, "User cancelled operation".to_string())]
        );
    }

    #[test]
    fn test_failure_after_ctrl_c_is_cancellation() {
        let console = Lines::default();
        let interrupt = Interrupt::new();
        interrupt.trigger();

        let result = Err(anyhow!("tar failed (exit status 130): interrupted"));
        assert_eq!(exit_status(result, &interrupt, &console).unwrap(), 130);
    }

    #[test]
    fn test_other_errors_propagate() {
        let console = Lines::default();

        let err = exit_status(Err(anyhow!("HTTP 404")), &Interrupt::new(), &console).unwrap_err();

        assert_eq!(err.to_string(), "HTTP 404");
        assert!(console.0.borrow().is_empty());
    }
}
