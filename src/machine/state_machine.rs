//! State machine that fires triggers through a state hierarchy.

use crate::builder::StateConfiguration;
use crate::core::{
    FiredTransition, LifecyclePhase, Representations, State, StateHistory, StateRepresentation,
    Transition, TransitionError, Trigger,
};
use crate::diagnostics::{self, ConfigurationIssue, MachineInfo};
use crate::machine::options::MachineOptions;
use chrono::Utc;
use std::collections::HashSet;
use std::fmt;
use std::io;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, trace, warn};
use uuid::Uuid;

/// Hierarchical state machine over caller-supplied state and trigger values.
///
/// The machine owns the current-state cell, the arena of state
/// representations and a bounded history of fired transitions.
///
/// # Lifecycle actions
///
/// [`fire`](Self::fire) runs exit and entry actions across every hierarchy
/// level spanned by the transition, bounded by the lowest common ancestor of
/// the current state and the destination:
///
/// - states from the current one up to (not including) the common ancestor
///   are exited, innermost first;
/// - states from below the common ancestor down to the destination are
///   entered, outermost first;
/// - a reentry (destination equal to the transition's source, or to the
///   current state) exits up to and including that state and enters it again.
///
/// Moving from a substate to its superstate therefore runs no entry action,
/// and moving from a superstate into one of its substates runs no exit
/// action.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use superstate::StateMachine;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Player { Stopped, Active, Playing, Paused }
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Button { Play, Pause, Stop }
///
/// let log = Arc::new(Mutex::new(Vec::new()));
/// let mut player: StateMachine<Player, Button> = StateMachine::new(Player::Stopped);
///
/// player.configure(Player::Stopped).permit(Button::Play, Player::Playing)?;
/// let entered = Arc::clone(&log);
/// player
///     .configure(Player::Active)
///     .permit(Button::Stop, Player::Stopped)?
///     .on_entry(move || entered.lock().unwrap().push("active"));
/// let entered = Arc::clone(&log);
/// player
///     .configure(Player::Playing)
///     .substate_of(Player::Active)
///     .permit(Button::Pause, Player::Paused)?
///     .on_entry(move || entered.lock().unwrap().push("playing"));
/// player.configure(Player::Paused).substate_of(Player::Active);
///
/// assert!(player.fire(Button::Play)?);
/// assert_eq!(*log.lock().unwrap(), vec!["active", "playing"]);
///
/// assert!(player.fire(Button::Pause)?);
/// assert!(player.is_in_state(&Player::Active));
///
/// // Inherited from Active.
/// assert!(player.fire(Button::Stop)?);
/// assert_eq!(player.current_state(), &Player::Stopped);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct StateMachine<S, T, P = ()> {
    id: Uuid,
    current: S,
    representations: Representations<S, T, P>,
    history: StateHistory<S, T>,
    options: MachineOptions,
}

impl<S: State, T: Trigger, P> StateMachine<S, T, P> {
    /// Create a machine in `initial` with default options.
    ///
    /// The initial state is trusted as-is; it does not need to be
    /// configured.
    pub fn new(initial: S) -> Self {
        Self::with_options(initial, MachineOptions::default())
    }

    pub fn with_options(initial: S, options: MachineOptions) -> Self {
        let id = Uuid::new_v4();
        let mut representations = Representations::new();
        representations.get_or_insert(initial.clone());
        debug!(machine = %id, ?initial, "state machine created");

        Self {
            id,
            current: initial,
            representations,
            history: StateHistory::with_capacity(options.history_limit),
            options,
        }
    }

    /// Identifier attached to this machine's log events.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn options(&self) -> &MachineOptions {
        &self.options
    }

    /// Get current state
    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Get fired-transition history
    pub fn history(&self) -> &StateHistory<S, T> {
        &self.history
    }

    /// Begin configuring `state`, creating its representation if needed.
    pub fn configure(&mut self, state: S) -> StateConfiguration<'_, S, T, P> {
        StateConfiguration::new(state, &mut self.representations)
    }

    pub fn representation(&self, state: &S) -> Option<&StateRepresentation<S, T, P>> {
        self.representations.get(state)
    }

    pub fn representations(&self) -> &Representations<S, T, P> {
        &self.representations
    }

    fn current_representation(&self) -> Option<&StateRepresentation<S, T, P>> {
        self.representations.get(&self.current)
    }

    /// The transition `fire(trigger)` would take right now, if any.
    pub fn resolve(&self, trigger: &T) -> Result<Option<&Transition<S, T, P>>, TransitionError> {
        match self.current_representation() {
            Some(rep) => rep.get_handler(trigger, &self.representations),
            None => Ok(None),
        }
    }

    /// True if `trigger` would cause a transition in the current state.
    pub fn can_fire(&self, trigger: &T) -> Result<bool, TransitionError> {
        match self.current_representation() {
            Some(rep) => rep.can_handle(trigger, &self.representations),
            None => Ok(false),
        }
    }

    /// Triggers that currently have an enabled transition, including those
    /// inherited from superstates.
    pub fn permitted_triggers(&self) -> HashSet<T> {
        self.current_representation()
            .map(|rep| rep.permitted_triggers(&self.representations))
            .unwrap_or_default()
    }

    /// True if the current state is `state` or one of its substates.
    pub fn is_in_state(&self, state: &S) -> bool {
        match self.current_representation() {
            Some(rep) => rep.is_included_in(state, &self.representations),
            None => self.current == *state,
        }
    }

    /// Fire `trigger` from the current state.
    ///
    /// Returns `Ok(false)` without side effects when no enabled transition
    /// handles the trigger. Returns an error when guards are ambiguous or a
    /// lifecycle action fails. A failed exit action leaves the current state
    /// unchanged; a failed entry action leaves the machine in the
    /// destination.
    pub fn fire(&mut self, trigger: T) -> Result<bool, TransitionError> {
        let Some(transition) = self.resolve(&trigger)? else {
            debug!(machine = %self.id, state = ?self.current, ?trigger, "trigger rejected");
            return Ok(false);
        };

        let source = transition.source().clone();
        let destination = transition.destination().clone();
        let (exiting, entering) = self.lifecycle_path(&source, &destination);
        debug!(
            machine = %self.id,
            from = ?self.current,
            to = ?destination,
            ?trigger,
            "firing transition"
        );

        for state in &exiting {
            self.run_lifecycle(state, LifecyclePhase::Exit)?;
        }
        let from = std::mem::replace(&mut self.current, destination.clone());
        for state in &entering {
            self.run_lifecycle(state, LifecyclePhase::Entry)?;
        }

        self.history.record(FiredTransition {
            from,
            to: destination,
            trigger,
            timestamp: Utc::now(),
        });
        Ok(true)
    }

    /// States to exit (innermost first) and enter (outermost first) when
    /// moving from the current state to `destination`.
    fn lifecycle_path(&self, source: &S, destination: &S) -> (Vec<S>, Vec<S>) {
        let current_chain = self.representations.lineage(&self.current);

        if source == destination || *destination == self.current {
            let mut exiting: Vec<S> = current_chain
                .into_iter()
                .take_while(|s| s != destination)
                .collect();
            exiting.push(destination.clone());
            return (exiting, vec![destination.clone()]);
        }

        let destination_chain = self.representations.lineage(destination);
        let boundary = current_chain
            .iter()
            .find(|s| destination_chain.contains(s))
            .cloned();
        let outside = |s: &S| Some(s) != boundary.as_ref();

        let exiting = current_chain.into_iter().take_while(|s| outside(s)).collect();
        let mut entering: Vec<S> = destination_chain
            .into_iter()
            .take_while(|s| outside(s))
            .collect();
        entering.reverse();
        (exiting, entering)
    }

    fn run_lifecycle(&self, state: &S, phase: LifecyclePhase) -> Result<(), TransitionError> {
        let Some(rep) = self.representations.get(state) else {
            return Ok(());
        };
        trace!(machine = %self.id, ?state, %phase, "running lifecycle actions");

        let result = match phase {
            LifecyclePhase::Entry => rep.enter(),
            LifecyclePhase::Exit => rep.exit(),
        };
        result.map_err(|source| {
            warn!(machine = %self.id, ?state, %phase, error = %source, "lifecycle action failed");
            TransitionError::ActionFailed {
                state: format!("{state:?}"),
                phase,
                source,
            }
        })
    }

    /// Snapshot of the configured states and transitions.
    pub fn info(&self) -> MachineInfo<S, T> {
        MachineInfo::from_representations(&self.current, &self.representations)
    }

    /// Write the transition graph in DOT format.
    pub fn write_dot<W: io::Write>(&self, out: W) -> io::Result<()> {
        diagnostics::write_dot(&self.info(), out)
    }

    /// Check the configuration for problems that would surface only at run
    /// time, reporting all of them at once.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigurationIssue>> {
        diagnostics::validate(&self.representations)
    }
}

impl<S: State, T: Trigger, P> fmt::Display for StateMachine<S, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut triggers: Vec<String> = self
            .permitted_triggers()
            .iter()
            .map(|t| format!("{t:?}"))
            .collect();
        triggers.sort();

        write!(
            f,
            "StateMachine {{ State = {:?}, PermittedTriggers = {{ {} }} }}",
            self.current,
            triggers.join(", ")
        )
    }
}
