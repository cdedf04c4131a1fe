//! Errors raised while configuring states.

use thiserror::Error;

/// Errors that can occur when configuring a state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "permit() and permit_if() require the destination state to differ from the source \
         state '{state}'. To accept a trigger without changing state, use permit_reentry()"
    )]
    IdentityTransition { state: String },
}
