//! Record of fired transitions.
//!
//! The machine appends one [`FiredTransition`] per successful `fire`. The
//! history is bounded: once full, the oldest record is dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use superstate::core::FiredTransition;
///
/// let record = FiredTransition {
///     from: "locked",
///     to: "unlocked",
///     trigger: "coin",
///     timestamp: Utc::now(),
/// };
/// assert!(!record.is_reentry());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FiredTransition<S, T> {
    /// The state the machine was in when the trigger fired
    pub from: S,
    /// The state the machine ended in
    pub to: S,
    /// The trigger that caused the transition
    pub trigger: T,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

impl<S: PartialEq, T> FiredTransition<S, T> {
    pub fn is_reentry(&self) -> bool {
        self.from == self.to
    }
}

/// Bounded, ordered history of fired transitions.
///
/// A capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use chrono::Utc;
/// use superstate::core::{FiredTransition, StateHistory};
///
/// let mut history = StateHistory::with_capacity(2);
/// for (from, to) in [("a", "b"), ("b", "c"), ("c", "d")] {
///     history.record(FiredTransition { from, to, trigger: "next", timestamp: Utc::now() });
/// }
///
/// assert_eq!(history.get_path(), vec![&"b", &"c", &"d"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<S, T> {
    capacity: usize,
    transitions: VecDeque<FiredTransition<S, T>>,
}

impl<S, T> StateHistory<S, T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_enabled(&self) -> bool {
        self.capacity > 0
    }

    /// Append a record, evicting the oldest one when full.
    pub fn record(&mut self, transition: FiredTransition<S, T>) {
        if !self.is_enabled() {
            self.transitions.clear();
            return;
        }
        // A deserialized history may hold more than `capacity` records.
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// States traversed, oldest first: the `from` of the oldest retained
    /// record, then the `to` of each record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        let first = self.transitions.front()?;
        let last = self.transitions.back()?;
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &FiredTransition<S, T>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&FiredTransition<S, T>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}
