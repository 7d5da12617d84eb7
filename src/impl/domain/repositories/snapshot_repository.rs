use fractic_server_error::ServerError;

use crate::entities::{AppState, StateChange};

pub trait SnapshotRepository {
    /// Reads every persisted collection. Missing or unreadable collections
    /// fall back to their defaults; loading never fails.
    fn load(&self) -> AppState;

    /// Writes the collections flagged in `change`.
    fn save(&mut self, state: &AppState, change: StateChange) -> Result<(), ServerError>;

    /// Removes every persisted collection.
    fn clear(&mut self) -> Result<(), ServerError>;
}
