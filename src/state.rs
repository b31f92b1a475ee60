use crate::errors::StorageError;
use crate::session::Session;
use crate::storage::persist_dirty;
use crate::tracker::{Dirty, HabitTracker};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, MutexGuard};

#[derive(Clone)]
pub struct AppState {
    pub data_dir: PathBuf,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(data_dir: PathBuf, tracker: HabitTracker) -> Self {
        Self {
            data_dir,
            session: Arc::new(Mutex::new(Session::new(tracker))),
        }
    }

    /// Writes back what a mutation touched. Called with the session guard
    /// still held so no other request observes unpersisted state.
    pub async fn commit(&self, session: &MutexGuard<'_, Session>, dirty: Dirty) -> Result<(), StorageError> {
        if !dirty.any() {
            return Ok(());
        }
        persist_dirty(&self.data_dir, &session.tracker, dirty).await
    }
}
