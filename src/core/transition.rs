//! Configured transitions and the errors raised while resolving or
//! executing them.

use crate::core::action::ActionError;
use crate::core::guard::Guard;
use std::fmt;

/// Which lifecycle step an action belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Entry,
    Exit,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => f.write_str("entry"),
            Self::Exit => f.write_str("exit"),
        }
    }
}

/// Errors that can occur while firing a trigger
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error(
        "Multiple permitted transitions ({count}) are configured from state '{state}' \
         for trigger '{trigger}'. Guard clauses must be mutually exclusive"
    )]
    AmbiguousGuards {
        state: String,
        trigger: String,
        count: usize,
    },

    #[error("{phase} action of state '{state}' failed: {source}")]
    ActionFailed {
        state: String,
        phase: LifecyclePhase,
        #[source]
        source: ActionError,
    },
}

/// One configured edge of the state graph.
///
/// Transitions are immutable once built: the `with_*` methods consume the
/// value and are meant for construction only.
///
/// # Example
///
/// ```rust
/// use superstate::core::{Guard, Transition};
///
/// let transition: Transition<&str, &str> = Transition::new("idle", "running", Some("start"))
///     .with_guard(Guard::always());
///
/// assert_eq!(transition.destination(), &"running");
/// assert!(transition.can_enable());
/// assert!(!transition.is_reentry());
/// ```
#[derive(Debug)]
pub struct Transition<S, T, P = ()> {
    source: S,
    destination: S,
    trigger: Option<T>,
    guard: Option<Guard>,
    payload: Option<P>,
}

impl<S, T, P> Transition<S, T, P> {
    pub fn new(source: S, destination: S, trigger: Option<T>) -> Self {
        Self {
            source,
            destination,
            trigger,
            guard: None,
            payload: None,
        }
    }

    pub fn with_guard(mut self, guard: Guard) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn with_payload(mut self, payload: P) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn destination(&self) -> &S {
        &self.destination
    }

    pub fn trigger(&self) -> Option<&T> {
        self.trigger.as_ref()
    }

    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    /// Evaluate the guard. A transition without a guard is always enabled.
    pub fn can_enable(&self) -> bool {
        self.guard.as_ref().is_none_or(Guard::check)
    }
}

impl<S: PartialEq, T, P> Transition<S, T, P> {
    pub fn is_reentry(&self) -> bool {
        self.source == self.destination
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        A,
        B,
        C,
    }

    #[derive(Clone, PartialEq, Eq, Hash, Debug)]
    enum TestTrigger {
        X,
        Y,
    }

    #[test]
    fn is_reentry_compares_source_and_destination() {
        let t: Transition<i32, i32> = Transition::new(1, 1, Some(0));
        assert!(t.is_reentry());

        let t: Transition<i32, i32> = Transition::new(1, 2, Some(0));
        assert!(!t.is_reentry());
    }

    #[test]
    fn fully_specified_transition_exposes_fields() {
        let t: Transition<TestState, TestTrigger, &str> =
            Transition::new(TestState::A, TestState::B, Some(TestTrigger::X))
                .with_guard(Guard::always())
                .with_payload("audit");

        assert_eq!(t.source(), &TestState::A);
        assert_eq!(t.destination(), &TestState::B);
        assert_eq!(t.trigger(), Some(&TestTrigger::X));
        assert_eq!(t.payload(), Some(&"audit"));
        assert!(t.has_guard());
        assert!(t.can_enable());
    }

    #[test]
    fn false_guard_disables_transition() {
        let t: Transition<TestState, TestTrigger> =
            Transition::new(TestState::B, TestState::C, Some(TestTrigger::Y))
                .with_guard(Guard::never());

        assert!(!t.can_enable());
    }

    #[test]
    fn bare_transition_has_no_trigger_guard_or_payload() {
        let t: Transition<TestState, TestTrigger> =
            Transition::new(TestState::C, TestState::A, None);

        assert_eq!(t.trigger(), None);
        assert!(t.payload().is_none());
        assert!(!t.has_guard());
        assert!(t.can_enable());
    }

    #[test]
    fn ambiguous_guards_message_names_state_and_trigger() {
        let err = TransitionError::AmbiguousGuards {
            state: "A".to_string(),
            trigger: "X".to_string(),
            count: 2,
        };

        let message = err.to_string();
        assert!(message.contains("from state 'A'"));
        assert!(message.contains("for trigger 'X'"));
    }

    #[test]
    fn action_failure_message_names_phase() {
        let err = TransitionError::ActionFailed {
            state: "B".to_string(),
            phase: LifecyclePhase::Exit,
            source: ActionError::new("boom"),
        };

        assert_eq!(err.to_string(), "exit action of state 'B' failed: boom");
    }
}
