//! Superstate: a hierarchical state machine library
//!
//! States and triggers are plain caller-owned values. A machine is
//! configured state by state with a fluent builder, then driven by firing
//! triggers. Configuration and firing are separate phases; configuration may
//! continue between fires.
//!
//! # Core Concepts
//!
//! - **State / Trigger**: any `Clone + Eq + Hash + Debug` value, typically a fieldless enum
//! - **Guards**: predicates deciding at fire time whether a transition is enabled
//! - **Actions**: entry and exit hooks run as the machine moves between states
//! - **Hierarchy**: substates inherit their superstate's transitions
//! - **History**: bounded record of fired transitions
//! - **Diagnostics**: serializable snapshots, DOT graphs and configuration validation
//!
//! # Example
//!
//! ```rust
//! use superstate::StateMachine;
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! enum Turnstile {
//!     Locked,
//!     Unlocked,
//! }
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! enum Input {
//!     Coin,
//!     Push,
//! }
//!
//! let mut turnstile: StateMachine<Turnstile, Input> = StateMachine::new(Turnstile::Locked);
//! turnstile
//!     .configure(Turnstile::Locked)
//!     .permit(Input::Coin, Turnstile::Unlocked)?
//!     .permit_reentry(Input::Push);
//! turnstile
//!     .configure(Turnstile::Unlocked)
//!     .permit(Input::Push, Turnstile::Locked)?;
//!
//! assert!(turnstile.fire(Input::Coin)?);
//! assert_eq!(turnstile.current_state(), &Turnstile::Unlocked);
//! assert!(!turnstile.fire(Input::Coin)?);
//! assert!(turnstile.fire(Input::Push)?);
//! assert_eq!(turnstile.history().get_path().len(), 3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod builder;
pub mod core;
pub mod diagnostics;
pub mod machine;

// Re-export commonly used types
pub use builder::{ConfigurationError, StateConfiguration};
pub use crate::core::{ActionError, Guard, State, StateHistory, TransitionError, Trigger};
pub use diagnostics::{ConfigurationIssue, MachineInfo};
pub use machine::{MachineOptions, StateMachine};
