//! Guard for the "primary directive executed" marker.
//!
//! Each operation may run its primary directive once. The check-and-set of that marker
//! is the only state shared between concurrent actions of a phase, so it sits behind an
//! exclusive lock held for the check-and-set alone and released before the handler runs.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Marker set for the operations of one context, keyed by operation index.
#[derive(Debug, Default)]
pub struct PrimaryLock {
    marked: Mutex<HashSet<usize>>,
}

impl PrimaryLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker for `operation`.
    ///
    /// Returns `false` if it was already set; exactly one caller per operation ever
    /// observes `true`.
    pub fn try_mark(&self, operation: usize) -> bool {
        let mut marked = self.marked.lock().unwrap_or_else(PoisonError::into_inner);
        marked.insert(operation)
    }

    #[must_use]
    pub fn is_marked(&self, operation: usize) -> bool {
        self.marked.lock().unwrap_or_else(PoisonError::into_inner).contains(&operation)
    }
}
