use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs the versioned migrations for the progress mirror.
///
/// Lesson, achievement and objective rows hang off the single
/// `mirrored_progress` row and are replaced together with it.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: progress mirror.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS mirrored_progress (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    current_streak INTEGER NOT NULL CHECK (current_streak >= 0),
                    saved_at TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS mirrored_lessons (
                    progress_id INTEGER NOT NULL,
                    lesson_id INTEGER NOT NULL CHECK (lesson_id >= 0),
                    position INTEGER NOT NULL,
                    PRIMARY KEY (progress_id, lesson_id),
                    FOREIGN KEY (progress_id) REFERENCES mirrored_progress(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS mirrored_achievements (
                    progress_id INTEGER NOT NULL,
                    achievement_id TEXT NOT NULL,
                    position INTEGER NOT NULL,
                    title TEXT,
                    description TEXT,
                    PRIMARY KEY (progress_id, achievement_id),
                    FOREIGN KEY (progress_id) REFERENCES mirrored_progress(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS mirrored_objectives (
                    progress_id INTEGER NOT NULL,
                    objective_key TEXT NOT NULL,
                    position INTEGER NOT NULL,
                    PRIMARY KEY (progress_id, objective_key),
                    FOREIGN KEY (progress_id) REFERENCES mirrored_progress(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
