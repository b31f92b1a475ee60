use crate::errors::StorageError;
use crate::models::{CompletionRecord, Habit};
use crate::tracker::{Dirty, HabitTracker};
use serde::{Serialize, de::DeserializeOwned};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, error};

pub const HABITS_KEY: &str = "habit-tracker-habits";
pub const COMPLETIONS_KEY: &str = "habit-tracker-checkedDays";

pub fn resolve_data_dir() -> PathBuf {
    env::var("APP_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

pub fn key_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}

/// Reads both keys. Anything missing or undecodable starts empty.
pub async fn load_tracker(dir: &Path) -> HabitTracker {
    let habits: Vec<Habit> = load_key(dir, HABITS_KEY).await;
    let completions: CompletionRecord = load_key(dir, COMPLETIONS_KEY).await;
    HabitTracker::new(habits, completions)
}

async fn load_key<T: DeserializeOwned + Default>(dir: &Path, key: &str) -> T {
    let path = key_path(dir, key);
    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => {
                error!(key, "failed to parse stored value: {err}");
                T::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(err) => {
            error!(key, "failed to read stored value: {err}");
            T::default()
        }
    }
}

/// Rewrites every collection named in `dirty`, each as a full overwrite.
pub async fn persist_dirty(dir: &Path, tracker: &HabitTracker, dirty: Dirty) -> Result<(), StorageError> {
    // Completions go first: if the second write fails, the stored record
    // never names a habit the stored list has already dropped.
    if dirty.completions {
        persist_key(dir, COMPLETIONS_KEY, tracker.completions()).await?;
    }
    if dirty.habits {
        persist_key(dir, HABITS_KEY, tracker.habits()).await?;
    }
    Ok(())
}

async fn persist_key<T: Serialize + ?Sized>(dir: &Path, key: &'static str, value: &T) -> Result<(), StorageError> {
    let payload = serde_json::to_vec_pretty(value).map_err(|source| StorageError::Encode { key, source })?;
    fs::write(key_path(dir, key), payload)
        .await
        .map_err(|source| StorageError::Io { key, source })?;
    debug!(key, "persisted");
    Ok(())
}
