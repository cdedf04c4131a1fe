//! Per-state configuration and hierarchical trigger resolution.
//!
//! Every state value known to a machine owns one [`StateRepresentation`]
//! stored in a [`Representations`] arena. Hierarchy links are kept as state
//! keys into the arena, never as references, so a representation does not
//! own its relatives and the substate relation can be walked in both
//! directions.

use crate::core::action::{Action, ActionResult};
use crate::core::state::{State, Trigger};
use crate::core::transition::{Transition, TransitionError};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Entry/exit actions, outgoing transitions and hierarchy position of one
/// state.
pub struct StateRepresentation<S, T, P = ()> {
    state: S,
    transitions: HashMap<T, Vec<Transition<S, T, P>>>,
    untriggered: Vec<Transition<S, T, P>>,
    entry_actions: Vec<Action>,
    exit_actions: Vec<Action>,
    superstate: Option<S>,
    substates: Vec<S>,
}

impl<S: State, T: Trigger, P> StateRepresentation<S, T, P> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            transitions: HashMap::new(),
            untriggered: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            superstate: None,
            substates: Vec::new(),
        }
    }

    /// The state value this representation describes.
    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn superstate(&self) -> Option<&S> {
        self.superstate.as_ref()
    }

    pub fn substates(&self) -> &[S] {
        &self.substates
    }

    /// Transitions registered for `trigger`, in registration order.
    pub fn transitions_for(&self, trigger: &T) -> &[Transition<S, T, P>] {
        self.transitions
            .get(trigger)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Triggers with at least one local transition.
    pub fn triggers(&self) -> impl Iterator<Item = &T> {
        self.transitions.keys()
    }

    /// Every local transition, including those registered without a trigger.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<S, T, P>> {
        self.transitions.values().flatten().chain(&self.untriggered)
    }

    pub fn entry_action_count(&self) -> usize {
        self.entry_actions.len()
    }

    pub fn exit_action_count(&self) -> usize {
        self.exit_actions.len()
    }

    /// Append a transition to the list for its trigger.
    ///
    /// Guard exclusivity is not checked here: guards are dynamic and can
    /// only conflict at resolution time.
    pub fn add_transition(&mut self, transition: Transition<S, T, P>) {
        match transition.trigger().cloned() {
            Some(trigger) => self.transitions.entry(trigger).or_default().push(transition),
            None => self.untriggered.push(transition),
        }
    }

    pub fn add_entry_action(&mut self, action: Action) {
        self.entry_actions.push(action);
    }

    pub fn add_exit_action(&mut self, action: Action) {
        self.exit_actions.push(action);
    }

    /// Set one half of the hierarchy link. Use [`Representations::link`]
    /// to keep both halves consistent.
    pub fn set_superstate(&mut self, superstate: S) {
        self.superstate = Some(superstate);
    }

    /// Set the other half of the hierarchy link. Adding a substate twice is
    /// a no-op.
    pub fn add_substate(&mut self, substate: S) {
        if !self.substates.contains(&substate) {
            self.substates.push(substate);
        }
    }

    pub(crate) fn remove_substate(&mut self, substate: &S) {
        self.substates.retain(|s| s != substate);
    }

    /// Run this state's own entry actions in registration order, stopping
    /// at the first failure.
    pub fn enter(&self) -> ActionResult {
        self.entry_actions.iter().try_for_each(Action::run)
    }

    /// Run this state's own exit actions in registration order, stopping at
    /// the first failure.
    pub fn exit(&self) -> ActionResult {
        self.exit_actions.iter().try_for_each(Action::run)
    }

    fn local_handler(&self, trigger: &T) -> Result<Option<&Transition<S, T, P>>, TransitionError> {
        let mut enabled = self
            .transitions_for(trigger)
            .iter()
            .filter(|t| t.can_enable());

        let Some(first) = enabled.next() else {
            return Ok(None);
        };

        let others = enabled.count();
        if others > 0 {
            warn!(state = ?self.state, ?trigger, count = others + 1, "ambiguous guards");
            return Err(TransitionError::AmbiguousGuards {
                state: format!("{:?}", self.state),
                trigger: format!("{trigger:?}"),
                count: others + 1,
            });
        }

        Ok(Some(first))
    }

    /// This representation followed by its ancestors, innermost first.
    pub fn self_and_ancestors<'a>(
        &'a self,
        representations: &'a Representations<S, T, P>,
    ) -> Ancestors<'a, S, T, P> {
        let detached = usize::from(!representations.contains(&self.state));
        Ancestors {
            next: Some(self),
            representations,
            remaining: representations.len() + detached,
        }
    }

    /// Resolve the single transition that fires for `trigger` here.
    ///
    /// Local transitions are considered first; if none is enabled the search
    /// continues at the superstate. More than one enabled local transition
    /// is an error.
    pub fn get_handler<'a>(
        &'a self,
        trigger: &T,
        representations: &'a Representations<S, T, P>,
    ) -> Result<Option<&'a Transition<S, T, P>>, TransitionError> {
        for rep in self.self_and_ancestors(representations) {
            if let Some(transition) = rep.local_handler(trigger)? {
                return Ok(Some(transition));
            }
        }
        Ok(None)
    }

    pub fn can_handle(
        &self,
        trigger: &T,
        representations: &Representations<S, T, P>,
    ) -> Result<bool, TransitionError> {
        Ok(self.get_handler(trigger, representations)?.is_some())
    }

    /// Triggers with at least one enabled transition here or in any
    /// ancestor.
    pub fn permitted_triggers(&self, representations: &Representations<S, T, P>) -> HashSet<T> {
        self.self_and_ancestors(representations)
            .flat_map(|rep| {
                rep.transitions
                    .iter()
                    .filter(|(_, candidates)| candidates.iter().any(Transition::can_enable))
                    .map(|(trigger, _)| trigger.clone())
            })
            .collect()
    }

    /// True if `state` is this state or one of its descendants.
    pub fn includes(&self, state: &S, representations: &Representations<S, T, P>) -> bool {
        let mut visited = HashSet::new();
        let mut pending = vec![self];
        while let Some(rep) = pending.pop() {
            if rep.state == *state {
                return true;
            }
            if !visited.insert(&rep.state) {
                continue;
            }
            pending.extend(rep.substates.iter().filter_map(|s| representations.get(s)));
        }
        false
    }

    /// True if `state` is this state or one of its ancestors.
    pub fn is_included_in(&self, state: &S, representations: &Representations<S, T, P>) -> bool {
        self.self_and_ancestors(representations)
            .any(|rep| rep.state == *state)
    }
}

/// Iterator over a representation and its superstate chain.
///
/// The walk is bounded by the arena size, so a misconfigured cyclic
/// hierarchy terminates instead of looping.
pub struct Ancestors<'a, S, T, P> {
    next: Option<&'a StateRepresentation<S, T, P>>,
    representations: &'a Representations<S, T, P>,
    remaining: usize,
}

impl<'a, S: State, T: Trigger, P> Iterator for Ancestors<'a, S, T, P> {
    type Item = &'a StateRepresentation<S, T, P>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.next.take()?;
        let representations = self.representations;
        self.next = current.superstate().and_then(|s| representations.get(s));
        Some(current)
    }
}

/// Arena of representations keyed by state value.
pub struct Representations<S, T, P = ()> {
    by_state: HashMap<S, StateRepresentation<S, T, P>>,
}

impl<S, T, P> Default for Representations<S, T, P> {
    fn default() -> Self {
        Self {
            by_state: HashMap::new(),
        }
    }
}

impl<S: State, T: Trigger, P> Representations<S, T, P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, state: &S) -> Option<&StateRepresentation<S, T, P>> {
        self.by_state.get(state)
    }

    pub fn get_mut(&mut self, state: &S) -> Option<&mut StateRepresentation<S, T, P>> {
        self.by_state.get_mut(state)
    }

    /// Fetch the representation for `state`, creating an empty one on first
    /// reference.
    pub fn get_or_insert(&mut self, state: S) -> &mut StateRepresentation<S, T, P> {
        self.by_state
            .entry(state)
            .or_insert_with_key(|s| StateRepresentation::new(s.clone()))
    }

    pub fn contains(&self, state: &S) -> bool {
        self.by_state.contains_key(state)
    }

    pub fn len(&self) -> usize {
        self.by_state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_state.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateRepresentation<S, T, P>> {
        self.by_state.values()
    }

    /// Make `substate` a child of `superstate`, creating either
    /// representation if needed. A previous superstate loses the child.
    pub fn link(&mut self, substate: S, superstate: S) {
        let previous = self
            .get_or_insert(substate.clone())
            .superstate()
            .cloned();
        if let Some(previous) = previous.filter(|p| *p != superstate) {
            if let Some(rep) = self.get_mut(&previous) {
                rep.remove_substate(&substate);
            }
        }

        self.get_or_insert(superstate.clone())
            .add_substate(substate.clone());
        self.get_or_insert(substate).set_superstate(superstate);
    }

    /// `state` followed by its ancestors, innermost first.
    pub fn lineage(&self, state: &S) -> Vec<S> {
        match self.get(state) {
            Some(rep) => rep
                .self_and_ancestors(self)
                .map(|r| r.state().clone())
                .collect(),
            None => vec![state.clone()],
        }
    }
}
