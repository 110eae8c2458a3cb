use std::sync::Arc;

use chessedu_core::achievement::{self, AchievementBoard, AchievementDefinition, CATALOG};
use chessedu_core::model::{AchievementId, ProgressSnapshot};
use tracing::{debug, warn};

use crate::error::{AchievementError, ProgressError};
use crate::progress_service::{LoadedProgress, ProgressService};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AchievementOverview {
    pub board: AchievementBoard,
    pub progress: LoadedProgress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AwardOutcome {
    /// Not in the catalog; logged and dropped.
    Unknown,
    AlreadyEarned,
    Awarded {
        definition: &'static AchievementDefinition,
        snapshot: ProgressSnapshot,
    },
}

#[derive(Clone)]
pub struct AchievementService {
    progress: Arc<ProgressService>,
}

impl AchievementService {
    #[must_use]
    pub fn new(progress: Arc<ProgressService>) -> Self {
        Self { progress }
    }

    /// Catalog partitioned against the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if progress cannot be loaded from server or mirror.
    pub async fn load_board(&self) -> Result<AchievementOverview, ProgressError> {
        let progress = self.progress.load().await?;
        for id in achievement::unknown_ids(&CATALOG, &progress.snapshot) {
            warn!(achievement = id, "server listed an achievement missing from the catalog");
        }
        let board = AchievementBoard::build(&CATALOG, &progress.snapshot);
        debug!(
            unlocked = board.unlocked_count(),
            empty = board.empty,
            "achievement board built"
        );
        Ok(AchievementOverview { board, progress })
    }

    /// Award an achievement unless it is unknown or already earned.
    ///
    /// # Errors
    ///
    /// Returns `AchievementError` if progress cannot be loaded or the server
    /// rejects the award.
    pub async fn award(&self, id: &str) -> Result<AwardOutcome, AchievementError> {
        let Some(definition) = achievement::find(id) else {
            warn!(achievement = id, "ignoring unknown achievement");
            return Ok(AwardOutcome::Unknown);
        };
        let current = self.progress.load().await?;
        if current.snapshot.has_achievement(definition.id) {
            debug!(achievement = id, "achievement already earned");
            return Ok(AwardOutcome::AlreadyEarned);
        }
        let snapshot = self
            .progress
            .add_achievement(&AchievementId::new(definition.id)?)
            .await?;
        Ok(AwardOutcome::Awarded {
            definition,
            snapshot,
        })
    }
}
