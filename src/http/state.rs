//! Application state for the HTTP server.

use crate::db::repository::FullRepository;
use crate::services::TrackLocks;
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for store operations
    pub repository: Arc<dyn FullRepository>,
    /// Per-track allocation locks shared by all requests
    pub track_locks: Arc<TrackLocks>,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            track_locks: Arc::new(TrackLocks::new()),
        }
    }
}
