//! Machine-level settings.

use serde::{Deserialize, Serialize};

/// Number of fired transitions kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Settings fixed at machine construction.
///
/// Missing fields take their defaults when deserialized, so a partial
/// document such as `{}` is valid.
///
/// # Example
///
/// ```rust
/// use superstate::MachineOptions;
///
/// let options = MachineOptions::from_json(r#"{ "history_limit": 8 }"#)?;
/// assert_eq!(options.history_limit, 8);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOptions {
    /// Maximum number of fired transitions retained; `0` disables history.
    pub history_limit: usize,
}

impl Default for MachineOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl MachineOptions {
    /// Options with history recording turned off.
    pub fn without_history() -> Self {
        Self { history_limit: 0 }
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keeps_history() {
        assert_eq!(MachineOptions::default().history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let options = MachineOptions::from_json("{}").unwrap();
        assert_eq!(options, MachineOptions::default());
    }

    #[test]
    fn without_history_sets_zero_limit() {
        assert_eq!(MachineOptions::without_history().history_limit, 0);
        assert_eq!(MachineOptions::default().history_limit(3).history_limit, 3);
    }

    #[test]
    fn malformed_document_is_rejected() {
        assert!(MachineOptions::from_json(r#"{ "history_limit": "many" }"#).is_err());
    }
}
