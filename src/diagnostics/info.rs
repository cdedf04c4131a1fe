//! Serializable snapshot of a machine's configuration.

use crate::core::{Representations, State, StateRepresentation, Trigger};
use serde::{Deserialize, Serialize};

/// One configured transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionInfo<S, T> {
    /// `None` for transitions registered without a trigger
    pub trigger: Option<T>,
    pub destination: S,
    pub guarded: bool,
}

/// One configured state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateInfo<S, T> {
    pub state: S,
    pub superstate: Option<S>,
    pub substates: Vec<S>,
    pub entry_actions: usize,
    pub exit_actions: usize,
    pub transitions: Vec<TransitionInfo<S, T>>,
}

/// The whole machine: its current state and every known state.
///
/// States are ordered by their `Debug` rendering, and transitions by trigger,
/// so two snapshots of the same configuration compare equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineInfo<S, T> {
    pub current_state: S,
    pub states: Vec<StateInfo<S, T>>,
}

impl<S: State, T: Trigger> MachineInfo<S, T> {
    pub fn from_representations<P>(current: &S, representations: &Representations<S, T, P>) -> Self {
        let mut states: Vec<StateInfo<S, T>> =
            representations.iter().map(StateInfo::from_representation).collect();
        states.sort_by_cached_key(|info| format!("{:?}", info.state));

        Self {
            current_state: current.clone(),
            states,
        }
    }

    pub fn state(&self, state: &S) -> Option<&StateInfo<S, T>> {
        self.states.iter().find(|info| info.state == *state)
    }

    /// Total number of configured transitions.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|info| info.transitions.len()).sum()
    }
}

impl<S: Serialize, T: Serialize> MachineInfo<S, T> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<S: State, T: Trigger> StateInfo<S, T> {
    fn from_representation<P>(rep: &StateRepresentation<S, T, P>) -> Self {
        let mut transitions: Vec<TransitionInfo<S, T>> = rep
            .transitions()
            .map(|t| TransitionInfo {
                trigger: t.trigger().cloned(),
                destination: t.destination().clone(),
                guarded: t.has_guard(),
            })
            .collect();
        // Stable: registration order is kept within a trigger.
        transitions.sort_by_cached_key(|info| format!("{:?}", info.trigger));

        Self {
            state: rep.state().clone(),
            superstate: rep.superstate().cloned(),
            substates: rep.substates().to_vec(),
            entry_actions: rep.entry_action_count(),
            exit_actions: rep.exit_action_count(),
            transitions,
        }
    }
}
