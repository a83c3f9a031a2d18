//! Monotonic identifier allocation.
//!
//! The allocator owns a single counter and hands out strictly increasing
//! values. It is an explicit, injectable component: every process (and every
//! test) constructs its own instance, so there is no hidden shared state.

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of unique, strictly increasing identifiers.
///
/// Implementations must be safe to call from any number of tasks at once and
/// must never return the same value twice.
pub trait IdGenerator: Send + Sync {
    /// Returns a value greater than every value previously returned.
    fn generate_id(&self) -> i64;
}

/// In-memory allocator backed by an atomic counter.
///
/// The first call returns 1. The counter is not persisted, so a restart
/// begins the sequence again.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    last_issued: AtomicI64,
}

impl SequentialIdGenerator {
    /// Creates an allocator whose first identifier is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_issued: AtomicI64::new(0),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> i64 {
        // The read-increment is a single atomic RMW; no other state is touched.
        self.last_issued.fetch_add(1, Ordering::Relaxed) + 1
    }
}
