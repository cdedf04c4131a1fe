//! Introspection over a configured machine.
//!
//! - [`MachineInfo`]: serializable snapshot of states and transitions
//! - [`write_dot`]: Graphviz rendering of the transition graph
//! - [`validate`]: accumulated configuration issues

pub mod dot;
pub mod info;
pub mod validation;

pub use dot::{to_dot, write_dot};
pub use info::{MachineInfo, StateInfo, TransitionInfo};
pub use validation::{validate, ConfigurationIssue};
