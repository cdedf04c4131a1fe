//! Builder API for configuring states.
//!
//! [`StateConfiguration`] is obtained from
//! [`StateMachine::configure`](crate::StateMachine::configure) and offers a
//! fluent surface for transitions, guards, lifecycle actions and nesting.

pub mod configuration;
pub mod error;

pub use configuration::StateConfiguration;
pub use error::ConfigurationError;
