use tracing::error;

use crate::{
    domain::repositories::snapshot_repository::SnapshotRepository,
    entities::{AppState, StateChange},
};

use super::state_controller::StateObserver;

/// Mirrors state changes into a snapshot repository. Only the changed
/// collections are written; a clear deletes every persisted collection.
pub(crate) struct PersistenceObserver<R: SnapshotRepository> {
    repository: R,
}

impl<R: SnapshotRepository> PersistenceObserver<R> {
    pub(crate) fn new(repository: R) -> Self {
        Self { repository }
    }
}

impl<R: SnapshotRepository> StateObserver for PersistenceObserver<R> {
    fn on_change(&mut self, state: &AppState, change: StateChange) {
        let result = if change.cleared {
            self.repository.clear()
        } else {
            self.repository.save(state, change)
        };
        if let Err(e) = result {
            // Not propagated: the in-memory state stays authoritative.
            error!(error = ?e, ?change, "Failed to persist state change.");
        }
    }
}
