use chessedu_core::model::{AchievementId, EarnedAchievement, LessonId};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} out of range")))
}

pub(crate) fn position_to_i64(index: usize) -> Result<i64, StorageError> {
    i64::try_from(index).map_err(|_| StorageError::Serialization("position overflow".into()))
}

pub(crate) fn map_lesson_row(row: &sqlx::sqlite::SqliteRow) -> Result<LessonId, StorageError> {
    let raw = row.try_get::<i64, _>("lesson_id").map_err(ser)?;
    Ok(LessonId::new(u32_from_i64("lesson_id", raw)?))
}

pub(crate) fn map_achievement_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<EarnedAchievement, StorageError> {
    let id = AchievementId::new(row.try_get::<String, _>("achievement_id").map_err(ser)?)
        .map_err(ser)?;
    Ok(EarnedAchievement {
        id,
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
    })
}
