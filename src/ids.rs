//! Id Allocation
//!
//! Centralized allocator for locally-created entities (columns, notes,
//! boards). Seeded from the clock so ids stay in the familiar
//! milliseconds-epoch range, then strictly monotonic so rapid creation
//! can never collide.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Monotonic id source, safe to share across state containers
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Allocator seeded from the current wall clock
    pub fn new() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self::starting_at(millis)
    }

    /// Allocator with an explicit first id (tests use small fixed seeds)
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    /// Hand out the next id
    pub fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
