//! Fluent configuration of one state.

use crate::builder::error::ConfigurationError;
use crate::core::{
    Action, ActionResult, Guard, Representations, State, StateRepresentation, Transition, Trigger,
};
use tracing::trace;

/// Builder facade over the representation of one state.
///
/// Holds the arena mutably so that destinations and superstates can be
/// resolved (and created on first reference) while configuring, which makes
/// the order in which related states are configured irrelevant.
///
/// # Example
///
/// ```rust
/// use superstate::StateMachine;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Phone { OffHook, Ringing, Connected }
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Call { Dial, Answer, HangUp }
///
/// let mut phone: StateMachine<Phone, Call> = StateMachine::new(Phone::OffHook);
/// phone
///     .configure(Phone::OffHook)
///     .permit(Call::Dial, Phone::Ringing)?;
/// phone
///     .configure(Phone::Ringing)
///     .permit(Call::Answer, Phone::Connected)?
///     .permit(Call::HangUp, Phone::OffHook)?;
/// phone
///     .configure(Phone::Connected)
///     .permit(Call::HangUp, Phone::OffHook)?
///     .on_entry(|| println!("connected"));
///
/// assert!(phone.fire(Call::Dial)?);
/// assert_eq!(phone.current_state(), &Phone::Ringing);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StateConfiguration<'m, S, T, P = ()> {
    state: S,
    representations: &'m mut Representations<S, T, P>,
}

impl<'m, S: State, T: Trigger, P> StateConfiguration<'m, S, T, P> {
    pub(crate) fn new(state: S, representations: &'m mut Representations<S, T, P>) -> Self {
        representations.get_or_insert(state.clone());
        Self {
            state,
            representations,
        }
    }

    /// The state being configured.
    pub fn state(&self) -> &S {
        &self.state
    }

    fn representation(&mut self) -> &mut StateRepresentation<S, T, P> {
        self.representations.get_or_insert(self.state.clone())
    }

    /// Accept `trigger` and move to `destination`.
    ///
    /// Fails if `destination` is the configured state; use
    /// [`permit_reentry`](Self::permit_reentry) for that.
    pub fn permit(self, trigger: T, destination: S) -> Result<Self, ConfigurationError> {
        self.enforce_not_identity(&destination)?;
        Ok(self.external_transition(destination, Some(trigger)))
    }

    /// Accept `trigger` and move to `destination` while `guard` holds.
    pub fn permit_if<G>(self, trigger: T, destination: S, guard: G) -> Result<Self, ConfigurationError>
    where
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.enforce_not_identity(&destination)?;
        Ok(self.external_transition_if(destination, Some(trigger), guard))
    }

    /// Accept `trigger`, exiting and re-entering the configured state.
    pub fn permit_reentry(self, trigger: T) -> Self {
        let destination = self.state.clone();
        self.external_transition(destination, Some(trigger))
    }

    /// Accept `trigger` while `guard` holds, exiting and re-entering the
    /// configured state.
    pub fn permit_reentry_if<G>(self, trigger: T, guard: G) -> Self
    where
        G: Fn() -> bool + Send + Sync + 'static,
    {
        let destination = self.state.clone();
        self.external_transition_if(destination, Some(trigger), guard)
    }

    /// Register a transition without the identity check.
    ///
    /// A transition with no trigger is kept for diagnostics but is never
    /// selected by `fire`.
    pub fn external_transition(self, destination: S, trigger: Option<T>) -> Self {
        self.external_transition_with(destination, trigger, None, None)
    }

    pub fn external_transition_if<G>(self, destination: S, trigger: Option<T>, guard: G) -> Self
    where
        G: Fn() -> bool + Send + Sync + 'static,
    {
        self.external_transition_with(destination, trigger, Some(Guard::new(guard)), None)
    }

    /// Register a transition with every optional part spelled out.
    pub fn external_transition_with(
        mut self,
        destination: S,
        trigger: Option<T>,
        guard: Option<Guard>,
        payload: Option<P>,
    ) -> Self {
        trace!(
            state = ?self.state,
            ?destination,
            ?trigger,
            guarded = guard.is_some(),
            "transition configured"
        );
        self.representations.get_or_insert(destination.clone());

        let mut transition = Transition::new(self.state.clone(), destination, trigger);
        if let Some(guard) = guard {
            transition = transition.with_guard(guard);
        }
        if let Some(payload) = payload {
            transition = transition.with_payload(payload);
        }
        self.representation().add_transition(transition);
        self
    }

    /// Run `action` whenever the configured state is entered.
    pub fn on_entry<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.representation().add_entry_action(Action::new(action));
        self
    }

    /// Like [`on_entry`](Self::on_entry), for actions that can fail.
    pub fn on_entry_fallible<F>(mut self, action: F) -> Self
    where
        F: Fn() -> ActionResult + Send + Sync + 'static,
    {
        self.representation()
            .add_entry_action(Action::fallible(action));
        self
    }

    /// Run `action` whenever the configured state is exited.
    pub fn on_exit<F>(mut self, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.representation().add_exit_action(Action::new(action));
        self
    }

    /// Like [`on_exit`](Self::on_exit), for actions that can fail.
    pub fn on_exit_fallible<F>(mut self, action: F) -> Self
    where
        F: Fn() -> ActionResult + Send + Sync + 'static,
    {
        self.representation()
            .add_exit_action(Action::fallible(action));
        self
    }

    /// Nest the configured state under `superstate`.
    ///
    /// Substates inherit the transitions of their superstate. Entering a
    /// substate from outside the superstate runs the superstate's entry
    /// actions first; leaving it for a state outside the superstate runs the
    /// superstate's exit actions last.
    pub fn substate_of(self, superstate: S) -> Self {
        trace!(state = ?self.state, ?superstate, "substate configured");
        self.representations.link(self.state.clone(), superstate);
        self
    }

    fn enforce_not_identity(&self, destination: &S) -> Result<(), ConfigurationError> {
        if *destination == self.state {
            return Err(ConfigurationError::IdentityTransition {
                state: format!("{:?}", self.state),
            });
        }
        Ok(())
    }
}
