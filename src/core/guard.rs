//! Guard predicates for controlling transitions.
//!
//! Guards are zero-argument boolean functions evaluated at resolution time.
//! They usually read caller-owned state captured by the closure, so the same
//! guard may answer differently from one `fire` to the next.

use std::fmt;

/// Predicate that determines if a transition is currently enabled.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use superstate::core::Guard;
///
/// let door_unlocked = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&door_unlocked);
/// let guard = Guard::new(move || flag.load(Ordering::SeqCst));
///
/// assert!(!guard.check());
/// door_unlocked.store(true, Ordering::SeqCst);
/// assert!(guard.check());
/// ```
pub struct Guard {
    predicate: Box<dyn Fn() -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// A guard that always allows the transition.
    pub fn always() -> Self {
        Guard::new(|| true)
    }

    /// A guard that never allows the transition.
    pub fn never() -> Self {
        Guard::new(|| false)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
