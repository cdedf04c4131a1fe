//! Marker traits for state and trigger values.
//!
//! States and triggers are opaque, caller-supplied values. The machine only
//! needs to compare, hash, clone and print them, so both traits are
//! blanket-implemented for every type with those capabilities.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// A state value identifies one node in the state hierarchy. It is used as
/// the key of the representation arena, so equal values always refer to the
/// same node.
///
/// # Required Traits
///
/// - `Clone`: states are copied into transitions and history records
/// - `Eq` + `Hash`: states key the representation arena
/// - `Debug`: states are printed in errors, logs and diagnostics
/// - `Send` + `Sync`: a machine may be moved to or shared with other threads
///
/// # Example
///
/// ```rust
/// use superstate::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// fn assert_state<S: State>(_: &S) {}
///
/// assert_state(&Door::Open);
/// assert_state(&"any hashable value");
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<X> State for X where X: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

/// Trait for trigger values: the input events fired into a machine.
///
/// Same capabilities as [`State`]; triggers key the per-state transition
/// table.
pub trait Trigger: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<X> Trigger for X where X: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
