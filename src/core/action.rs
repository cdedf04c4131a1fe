//! Entry and exit actions.

use std::fmt;
use thiserror::Error;

/// Error raised by a fallible entry or exit action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of running one action.
pub type ActionResult = Result<(), ActionError>;

/// A zero-argument side effect run when a state is entered or exited.
pub struct Action {
    run: Box<dyn Fn() -> ActionResult + Send + Sync>,
}

impl Action {
    /// Wrap an action that cannot fail.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::fallible(move || {
            action();
            Ok(())
        })
    }

    /// Wrap an action that may fail. A failure stops the remaining actions
    /// of the same lifecycle step and aborts the transition.
    pub fn fallible<F>(action: F) -> Self
    where
        F: Fn() -> ActionResult + Send + Sync + 'static,
    {
        Self {
            run: Box::new(action),
        }
    }

    pub fn run(&self) -> ActionResult {
        (self.run)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn infallible_action_runs_and_succeeds() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let action = Action::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(action.run().is_ok());
        assert!(action.run().is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn fallible_action_reports_error() {
        let action = Action::fallible(|| Err(ActionError::new("disk full")));

        let err = action.run().unwrap_err();
        assert_eq!(err.message(), "disk full");
        assert_eq!(err.to_string(), "disk full");
    }
}
