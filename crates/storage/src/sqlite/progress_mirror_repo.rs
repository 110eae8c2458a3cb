use async_trait::async_trait;
use chessedu_core::model::ProgressSnapshot;
use chrono::{DateTime, Utc};
use sqlx::Row;

use crate::repository::{MirroredProgress, ProgressMirrorRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{
    conn, map_achievement_row, map_lesson_row, position_to_i64, ser, u32_from_i64,
};

const MIRROR_ROW: i64 = 1;

#[async_trait]
impl ProgressMirrorRepository for SqliteRepository {
    async fn load_snapshot(&self) -> Result<Option<MirroredProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT current_streak, saved_at
            FROM mirrored_progress
            WHERE id = ?1
            ",
        )
        .bind(MIRROR_ROW)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };
        let current_streak =
            u32_from_i64("current_streak", row.try_get::<i64, _>("current_streak").map_err(ser)?)?;
        let saved_at: DateTime<Utc> = row.try_get("saved_at").map_err(ser)?;

        let completed_lessons = sqlx::query(
            r"
            SELECT lesson_id
            FROM mirrored_lessons
            WHERE progress_id = ?1
            ORDER BY position
            ",
        )
        .bind(MIRROR_ROW)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?
        .iter()
        .map(map_lesson_row)
        .collect::<Result<Vec<_>, _>>()?;

        let achievements = sqlx::query(
            r"
            SELECT achievement_id, title, description
            FROM mirrored_achievements
            WHERE progress_id = ?1
            ORDER BY position
            ",
        )
        .bind(MIRROR_ROW)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?
        .iter()
        .map(map_achievement_row)
        .collect::<Result<Vec<_>, _>>()?;

        let completed_objectives = sqlx::query(
            r"
            SELECT objective_key
            FROM mirrored_objectives
            WHERE progress_id = ?1
            ORDER BY position
            ",
        )
        .bind(MIRROR_ROW)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?
        .iter()
        .map(|row| row.try_get::<String, _>("objective_key").map_err(ser))
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(MirroredProgress {
            snapshot: ProgressSnapshot {
                completed_lessons,
                achievements,
                current_streak,
                completed_objectives,
            },
            saved_at,
        }))
    }

    async fn save_snapshot(
        &self,
        snapshot: &ProgressSnapshot,
        saved_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        // Children go with the parent row through ON DELETE CASCADE.
        sqlx::query("DELETE FROM mirrored_progress WHERE id = ?1")
            .bind(MIRROR_ROW)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO mirrored_progress (id, current_streak, saved_at)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(MIRROR_ROW)
        .bind(i64::from(snapshot.current_streak))
        .bind(saved_at)
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        for (position, lesson) in snapshot.completed_lessons.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO mirrored_lessons (progress_id, lesson_id, position)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(progress_id, lesson_id) DO NOTHING
                ",
            )
            .bind(MIRROR_ROW)
            .bind(i64::from(lesson.value()))
            .bind(position_to_i64(position)?)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        for (position, achievement) in snapshot.achievements.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO mirrored_achievements (progress_id, achievement_id, position, title, description)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(progress_id, achievement_id) DO NOTHING
                ",
            )
            .bind(MIRROR_ROW)
            .bind(achievement.id.as_str())
            .bind(position_to_i64(position)?)
            .bind(achievement.title.as_deref())
            .bind(achievement.description.as_deref())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        for (position, key) in snapshot.completed_objectives.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO mirrored_objectives (progress_id, objective_key, position)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(progress_id, objective_key) DO NOTHING
                ",
            )
            .bind(MIRROR_ROW)
            .bind(key.as_str())
            .bind(position_to_i64(position)?)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
