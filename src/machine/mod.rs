//! The runtime state machine and its settings.

pub mod options;
pub mod state_machine;

pub use options::{MachineOptions, DEFAULT_HISTORY_LIMIT};
pub use state_machine::StateMachine;
