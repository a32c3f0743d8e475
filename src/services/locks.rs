//! Per-track allocation locks.
//!
//! The conflict check and the store insert are separate repository calls; a
//! concurrent request for the same track could validate against stale reads
//! and produce overlapping bookings. Serializing validate-through-insert per
//! track number closes that race within this process (the engine assumes a
//! single writer; cross-process coordination is out of scope).

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A map of lazily created async mutexes keyed by track number.
///
/// Holds no per-request state; share one instance per repository.
#[derive(Default)]
pub struct TrackLocks {
    locks: Mutex<HashMap<i32, Arc<AsyncMutex<()>>>>,
}

impl TrackLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive lock for a track, creating it on first use.
    ///
    /// The guard must be held across the conflict check and every insert the
    /// request performs on that track.
    pub async fn acquire(&self, track_number: i32) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            Arc::clone(locks.entry(track_number).or_default())
        };
        lock.lock_owned().await
    }
}
