//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ListenerId`] allocation.
static LISTENER_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque handle for a registered lattice observer.
///
/// Allocated from a monotonic atomic counter via [`ListenerId::next`].
/// Two distinct registrations always receive different IDs, even across
/// different lattices, so a handle can never unregister an observer it
/// did not create after its own lattice dropped and another took its
/// place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocate a fresh, unique listener ID.
    ///
    /// Each call returns an ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(LISTENER_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
