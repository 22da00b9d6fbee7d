//! Metrics hooks for identity operations
//!
//! Counters a caller can read after a run to see how much of a dataset was
//! served from the registry and how crowded the identifier space is.
//!
//! ## Usage
//!
//! ```ignore
//! let service = IdentityService::new(config, StdRandomSource::new())?;
//! let out = service.extrapolate_ids(&registry, &new_rows, Strategy::Random, 8)?;
//! let snapshot = service.metrics().snapshot();
//! println!("reused {} / minted {}", snapshot.identifiers_reused, snapshot.identifiers_minted);
//! ```

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for identity operations
///
/// Thread-safe counters shared between a service and its observers.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Rows that received an identifier
    pub rows_assigned: AtomicU64,
    /// Identifiers produced for keys without one
    pub identifiers_minted: AtomicU64,
    /// Rows served from an existing registry
    pub identifiers_reused: AtomicU64,
    /// Random candidates rejected as already in use
    pub allocation_retries: AtomicU64,
    /// Stable identifiers equal to one already held by another key
    pub stable_collisions: AtomicU64,
    /// Allocations that ran out of attempts
    pub allocations_exhausted: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished assignment pass
    pub fn record_assignment(&self, rows: usize, minted: usize, reused: usize) {
        self.rows_assigned.fetch_add(rows as u64, Ordering::Relaxed);
        self.identifiers_minted.fetch_add(minted as u64, Ordering::Relaxed);
        self.identifiers_reused.fetch_add(reused as u64, Ordering::Relaxed);
    }

    pub fn record_retries(&self, retries: u64) {
        self.allocation_retries.fetch_add(retries, Ordering::Relaxed);
    }

    pub fn record_stable_collision(&self) {
        self.stable_collisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_exhausted(&self) {
        self.allocations_exhausted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            rows_assigned: self.rows_assigned.load(Ordering::Relaxed),
            identifiers_minted: self.identifiers_minted.load(Ordering::Relaxed),
            identifiers_reused: self.identifiers_reused.load(Ordering::Relaxed),
            allocation_retries: self.allocation_retries.load(Ordering::Relaxed),
            stable_collisions: self.stable_collisions.load(Ordering::Relaxed),
            allocations_exhausted: self.allocations_exhausted.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub rows_assigned: u64,
    pub identifiers_minted: u64,
    pub identifiers_reused: u64,
    pub allocation_retries: u64,
    pub stable_collisions: u64,
    pub allocations_exhausted: u64,
}
