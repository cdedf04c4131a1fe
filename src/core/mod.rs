//! Core state machine types and logic.
//!
//! This module contains the engine's building blocks:
//! - State and trigger values via the `State` and `Trigger` traits
//! - Guard predicates and entry/exit actions
//! - Immutable transition records
//! - Per-state representations and hierarchical trigger resolution
//! - Bounded history of fired transitions

mod action;
mod guard;
mod history;
mod representation;
mod state;
mod transition;

pub use action::{Action, ActionError, ActionResult};
pub use guard::Guard;
pub use history::{FiredTransition, StateHistory};
pub use representation::{Ancestors, Representations, StateRepresentation};
pub use state::{State, Trigger};
pub use transition::{LifecyclePhase, Transition, TransitionError};
