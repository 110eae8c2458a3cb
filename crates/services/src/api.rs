use std::time::Duration;

use async_trait::async_trait;
use chessedu_core::model::{AchievementId, ExerciseId, Lesson, LessonId, ProgressSnapshot};
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }
}

/// Reply of `/api/complete-exercise`. The server usually answers with the
/// full progress; anything else is kept as an opaque acknowledgement.
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseAck {
    pub progress: Option<ProgressSnapshot>,
    pub raw: serde_json::Value,
}

impl ExerciseAck {
    #[must_use]
    pub fn from_json(raw: serde_json::Value) -> Self {
        let progress = raw
            .get("completed_lessons")
            .is_some()
            .then(|| serde_json::from_value(raw.clone()).ok())
            .flatten();
        Self { progress, raw }
    }
}

/// Backend endpoints the client consumes.
#[async_trait]
pub trait ProgressApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    async fn fetch_progress(&self) -> Result<ProgressSnapshot, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    async fn complete_lesson(
        &self,
        lesson: LessonId,
        at: DateTime<Utc>,
    ) -> Result<ProgressSnapshot, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    async fn add_achievement(&self, id: &AchievementId) -> Result<ProgressSnapshot, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    async fn complete_exercise(&self, exercise: ExerciseId) -> Result<ExerciseAck, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or bad JSON.
    async fn list_lessons(&self) -> Result<Vec<Lesson>, ApiError>;

    /// `Ok(None)` when the server answers 404.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, other non-2xx status, or bad JSON.
    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, ApiError>;
}

#[derive(Clone)]
pub struct HttpProgressApi {
    client: Client,
    config: ApiConfig,
}

impl HttpProgressApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.config.url(path)).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        decode(response).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .client
            .post(self.config.url(path))
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(ApiError::HttpStatus(response.status()));
        }
        decode(response).await
    }
}

// Decode through serde_json so malformed bodies surface as `Decode`, not `Http`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[derive(Debug, Serialize)]
struct CompleteLessonRequest {
    lesson_id: LessonId,
    timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct AddAchievementRequest<'a> {
    achievement_id: &'a AchievementId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CompleteExerciseRequest {
    exercise_id: ExerciseId,
    completed: bool,
}

#[async_trait]
impl ProgressApi for HttpProgressApi {
    async fn fetch_progress(&self) -> Result<ProgressSnapshot, ApiError> {
        self.get("/progress").await
    }

    async fn complete_lesson(
        &self,
        lesson: LessonId,
        at: DateTime<Utc>,
    ) -> Result<ProgressSnapshot, ApiError> {
        let body = CompleteLessonRequest {
            lesson_id: lesson,
            timestamp: at,
        };
        self.post("/progress/complete-lesson", &body).await
    }

    async fn add_achievement(&self, id: &AchievementId) -> Result<ProgressSnapshot, ApiError> {
        let body = AddAchievementRequest { achievement_id: id };
        self.post("/progress/add-achievement", &body).await
    }

    async fn complete_exercise(&self, exercise: ExerciseId) -> Result<ExerciseAck, ApiError> {
        let body = CompleteExerciseRequest {
            exercise_id: exercise,
            completed: true,
        };
        let raw: serde_json::Value = self.post("/api/complete-exercise", &body).await?;
        Ok(ExerciseAck::from_json(raw))
    }

    async fn list_lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        self.get("/lessons").await
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, ApiError> {
        let response = self
            .client
            .get(self.config.url(&format!("/lesson/{id}")))
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if !status.is_success() => Err(ApiError::HttpStatus(status)),
            _ => decode(response).await.map(Some),
        }
    }
}
