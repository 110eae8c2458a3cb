use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chessedu_core::achievement::AchievementDefinition;
use chessedu_core::board::{parse_piece, parse_square};
use chessedu_core::model::{
    AchievementId, EarnedAchievement, ExerciseId, Lesson, LessonId, LessonStatus, ProgressSnapshot,
};
use chessedu_core::time::{fixed_clock, fixed_now};
use chrono::{DateTime, Utc};
use serde_json::json;
use services::{
    ApiError, AppServices, AwardOutcome, Celebrations, CompletionFailure, ExerciseAck,
    ExerciseRunner, NextStep, ProgressApi, ProgressError, ProgressSource,
};
use storage::repository::Storage;

#[derive(Default)]
struct FakeApi {
    snapshot: Mutex<ProgressSnapshot>,
    progress_down: AtomicBool,
    exercises: Mutex<Vec<ExerciseId>>,
}

impl FakeApi {
    fn set_down(&self, down: bool) {
        self.progress_down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.progress_down.load(Ordering::SeqCst) {
            return Err(ApiError::Decode(
                serde_json::from_str::<ProgressSnapshot>("down").unwrap_err(),
            ));
        }
        Ok(())
    }

    fn current(&self) -> ProgressSnapshot {
        self.snapshot.lock().unwrap().clone()
    }
}

fn lesson(id: u32, title: &str) -> Lesson {
    Lesson {
        id: LessonId::new(id),
        title: title.to_owned(),
        description: String::new(),
        content: String::new(),
        objectives: Vec::new(),
        interactive_exercises: Vec::new(),
    }
}

#[async_trait]
impl ProgressApi for FakeApi {
    async fn fetch_progress(&self) -> Result<ProgressSnapshot, ApiError> {
        self.check()?;
        Ok(self.current())
    }

    async fn complete_lesson(
        &self,
        lesson: LessonId,
        _at: DateTime<Utc>,
    ) -> Result<ProgressSnapshot, ApiError> {
        self.check()?;
        let mut snapshot = self.snapshot.lock().unwrap();
        if !snapshot.has_completed(lesson) {
            snapshot.completed_lessons.push(lesson);
        }
        Ok(snapshot.clone())
    }

    async fn add_achievement(&self, id: &AchievementId) -> Result<ProgressSnapshot, ApiError> {
        self.check()?;
        let mut snapshot = self.snapshot.lock().unwrap();
        snapshot.achievements.push(EarnedAchievement::new(id.clone()));
        Ok(snapshot.clone())
    }

    async fn complete_exercise(&self, exercise: ExerciseId) -> Result<ExerciseAck, ApiError> {
        self.check()?;
        self.exercises.lock().unwrap().push(exercise);
        Ok(ExerciseAck::from_json(json!({"status": "ok"})))
    }

    async fn list_lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        Ok(vec![lesson(2, "Opening Principles"), lesson(1, "Chess Basics")])
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, ApiError> {
        Ok((id.value() <= 2).then(|| lesson(id.value(), "Lesson")))
    }
}

fn services_with(api: &Arc<FakeApi>) -> AppServices {
    let api: Arc<dyn ProgressApi> = Arc::clone(api) as Arc<dyn ProgressApi>;
    AppServices::with_api(api, &Storage::in_memory(), fixed_clock())
}

#[derive(Default)]
struct Recorder {
    steps: Mutex<Vec<usize>>,
    failures: Mutex<usize>,
    finished: Mutex<Vec<String>>,
    unlocked: Mutex<Vec<&'static str>>,
}

impl Celebrations for Recorder {
    fn step_completed(&self, step: usize, _title: &str) {
        self.steps.lock().unwrap().push(step);
    }

    fn verification_failed(&self) {
        *self.failures.lock().unwrap() += 1;
    }

    fn exercise_completed(&self, title: &str) {
        self.finished.lock().unwrap().push(title.to_owned());
    }

    fn achievement_unlocked(&self, definition: &'static AchievementDefinition) {
        self.unlocked.lock().unwrap().push(definition.id);
    }
}

fn place(runner: &mut ExerciseRunner, square: &str, symbol: char) {
    runner.place_piece(parse_square(square).unwrap(), parse_piece(symbol).unwrap());
}

fn play_board_setup(runner: &mut ExerciseRunner) -> NextStep {
    runner.verify();
    assert!(matches!(runner.next().unwrap(), NextStep::Moved(1)));

    for file in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'] {
        place(runner, &format!("{file}2"), 'P');
        place(runner, &format!("{file}7"), 'p');
    }
    assert!(matches!(runner.next().unwrap(), NextStep::Moved(2)));

    let back_rank = ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R'];
    for (file, symbol) in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'].into_iter().zip(back_rank) {
        place(runner, &format!("{file}1"), symbol);
        place(runner, &format!("{file}8"), symbol.to_ascii_lowercase());
    }
    assert!(matches!(runner.next().unwrap(), NextStep::Moved(3)));

    runner.verify();
    runner.next().unwrap()
}

#[tokio::test]
async fn load_falls_back_to_the_mirror() {
    let api = Arc::new(FakeApi::default());
    api.snapshot.lock().unwrap().completed_lessons.push(LessonId::new(1));
    let services = services_with(&api);
    let progress = services.progress();

    let fresh = progress.load().await.unwrap();
    assert_eq!(fresh.source, ProgressSource::Server);
    assert!(!fresh.is_stale());

    api.set_down(true);
    let stale = progress.load().await.unwrap();
    assert_eq!(
        stale.source,
        ProgressSource::Mirror {
            saved_at: fixed_now()
        }
    );
    assert_eq!(stale.snapshot, fresh.snapshot);
}

#[tokio::test]
async fn load_fails_when_nothing_was_mirrored() {
    let api = Arc::new(FakeApi::default());
    api.set_down(true);
    let services = services_with(&api);

    let err = services.progress().load().await.unwrap_err();
    assert!(matches!(err, ProgressError::Api(_)));
}

#[tokio::test]
async fn award_is_idempotent_and_ignores_unknown_ids() {
    let api = Arc::new(FakeApi::default());
    let achievements = services_with(&api).achievements();

    assert_eq!(
        achievements.award("speed_demon").await.unwrap(),
        AwardOutcome::Unknown
    );

    let outcome = achievements.award("first_pin").await.unwrap();
    let AwardOutcome::Awarded { definition, snapshot } = outcome else {
        panic!("expected an award");
    };
    assert_eq!(definition.id, "first_pin");
    assert!(snapshot.has_achievement("first_pin"));

    assert_eq!(
        achievements.award("first_pin").await.unwrap(),
        AwardOutcome::AlreadyEarned
    );
    assert_eq!(api.current().achievements.len(), 1);
}

#[tokio::test]
async fn achievement_board_reflects_server_progress() {
    let api = Arc::new(FakeApi::default());
    let achievements = services_with(&api).achievements();

    let overview = achievements.load_board().await.unwrap();
    assert!(overview.board.empty);

    api.snapshot.lock().unwrap().completed_lessons.push(LessonId::new(1));
    let overview = achievements.load_board().await.unwrap();
    assert!(!overview.board.empty);
    assert_eq!(overview.board.cards[0].definition.id, "first_lesson");
    assert_eq!(overview.board.unlocked_count(), 2);
}

#[tokio::test]
async fn lessons_list_without_progress() {
    let api = Arc::new(FakeApi::default());
    api.set_down(true);
    let lessons = services_with(&api).lessons();

    let overview = lessons.list().await.unwrap();
    assert!(overview.progress.is_none());
    let statuses: Vec<_> = overview
        .lessons
        .iter()
        .map(|entry| (entry.lesson.id.value(), entry.status))
        .collect();
    assert_eq!(
        statuses,
        vec![(1, LessonStatus::Available), (2, LessonStatus::Locked)]
    );
}

#[tokio::test]
async fn finishing_an_exercise_awards_once() {
    let api = Arc::new(FakeApi::default());
    let services = services_with(&api);
    let recorder = Arc::new(Recorder::default());
    let hooks: Arc<dyn Celebrations> = Arc::clone(&recorder) as Arc<dyn Celebrations>;

    let mut runner =
        ExerciseRunner::start(ExerciseId::BoardSetup, services.exercise_capabilities(Some(hooks)))
            .unwrap();
    let NextStep::Finished(task) = play_board_setup(&mut runner) else {
        panic!("board setup should finish");
    };
    assert!(matches!(runner.next().unwrap(), NextStep::AlreadyFinished));

    let report = task.run().await;
    assert!(report.failures.is_empty());
    assert_eq!(report.awarded.map(|d| d.id), Some("board_setup"));
    assert!(api.current().has_achievement("board_setup"));

    assert_eq!(*recorder.steps.lock().unwrap(), vec![0, 1, 2, 3]);
    assert_eq!(*recorder.finished.lock().unwrap(), vec!["Board Setup".to_owned()]);
    assert_eq!(*recorder.unlocked.lock().unwrap(), vec!["board_setup"]);
}

#[tokio::test]
async fn completion_failures_are_reported_not_raised() {
    let api = Arc::new(FakeApi::default());
    let services = services_with(&api);
    let mut runner = ExerciseRunner::start(
        ExerciseId::BoardSetup,
        services.exercise_capabilities(None),
    )
    .unwrap();
    let NextStep::Finished(task) = play_board_setup(&mut runner) else {
        panic!("board setup should finish");
    };

    api.set_down(true);
    let report = task.run().await;
    assert!(report.awarded.is_none());
    assert!(matches!(report.failures.as_slice(), [CompletionFailure::Award(_)]));
}

#[tokio::test]
async fn exercises_without_capabilities_skip_side_effects() {
    let api = Arc::new(FakeApi::default());
    let mut runner =
        ExerciseRunner::start(ExerciseId::BoardSetup, Default::default()).unwrap();
    let NextStep::Finished(task) = play_board_setup(&mut runner) else {
        panic!("board setup should finish");
    };
    let report = task.run().await;
    assert!(report.failures.is_empty());
    assert!(report.awarded.is_none());
    assert!(api.current().achievements.is_empty());
}

#[test]
fn fork_practice_cannot_start() {
    assert!(ExerciseRunner::start(ExerciseId::ForkPractice, Default::default()).is_err());
}
