use async_trait::async_trait;
use chessedu_core::model::ProgressSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Last progress snapshot received from the server, with the time it was saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirroredProgress {
    pub snapshot: ProgressSnapshot,
    pub saved_at: DateTime<Utc>,
}

/// Local cache of the server-owned progress. It never holds anything the
/// server did not send.
#[async_trait]
pub trait ProgressMirrorRepository: Send + Sync {
    /// Fetch the mirrored snapshot, if one was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the mirror cannot be read.
    async fn load_snapshot(&self) -> Result<Option<MirroredProgress>, StorageError>;

    /// Replace the mirrored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be stored.
    async fn save_snapshot(
        &self,
        snapshot: &ProgressSnapshot,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<Option<MirroredProgress>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            progress: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl ProgressMirrorRepository for InMemoryRepository {
    async fn load_snapshot(&self) -> Result<Option<MirroredProgress>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_snapshot(
        &self,
        snapshot: &ProgressSnapshot,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(MirroredProgress {
            snapshot: snapshot.clone(),
            saved_at,
        });
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress_mirror: Arc<dyn ProgressMirrorRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let progress_mirror: Arc<dyn ProgressMirrorRepository> =
            Arc::new(InMemoryRepository::new());
        Self { progress_mirror }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessedu_core::model::LessonId;
    use chessedu_core::time::fixed_now;

    #[tokio::test]
    async fn empty_mirror_loads_nothing() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.load_snapshot().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot() {
        let repo = InMemoryRepository::new();
        let first = ProgressSnapshot {
            completed_lessons: vec![LessonId::new(1)],
            ..ProgressSnapshot::default()
        };
        let second = ProgressSnapshot {
            completed_lessons: vec![LessonId::new(1), LessonId::new(2)],
            current_streak: 2,
            ..ProgressSnapshot::default()
        };
        repo.save_snapshot(&first, fixed_now()).await.unwrap();
        repo.save_snapshot(&second, fixed_now()).await.unwrap();

        let mirrored = repo.load_snapshot().await.unwrap().unwrap();
        assert_eq!(mirrored.snapshot, second);
        assert_eq!(mirrored.saved_at, fixed_now());
    }
}
