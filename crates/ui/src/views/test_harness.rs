use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chessedu_core::board::{parse_piece, parse_square};
use chessedu_core::model::{
    AchievementId, EarnedAchievement, ExerciseId, Lesson, LessonId, ProgressSnapshot,
};
use chessedu_core::time::fixed_clock;
use chrono::{DateTime, Utc};
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AchievementService, ApiError, AppServices, Celebrations, CompletionTask,
    ExerciseCapabilities, ExerciseAck, ExerciseRunner, LessonService, NextStep, ProgressApi,
    ProgressService,
};
use storage::repository::Storage;
use tokio::sync::Notify;

use crate::context::{UiApp, build_app_context};
use crate::context::AppContext;
use crate::routes::Sidebar;
use crate::views::effects::{Effects, EffectsLayer, use_effects_provider};
use crate::views::exercise::report_completion;
use crate::views::live_progress::{LiveProgress, use_live_progress_provider};
use crate::views::{AchievementsView, ExerciseView, FreePlayView, LessonsView};
use crate::vm::EffectOutbox;

#[derive(Default)]
pub struct FakeApi {
    pub snapshot: Mutex<ProgressSnapshot>,
    pub progress_down: AtomicBool,
}

impl FakeApi {
    fn check(&self) -> Result<(), ApiError> {
        if self.progress_down.load(Ordering::SeqCst) {
            return Err(ApiError::Decode(
                serde_json::from_str::<ProgressSnapshot>("down").unwrap_err(),
            ));
        }
        Ok(())
    }
}

fn lesson(id: u32, title: &str, exercises: &[&str]) -> Lesson {
    Lesson {
        id: LessonId::new(id),
        title: title.to_owned(),
        description: format!("About {title}"),
        content: format!("{title} in depth"),
        objectives: vec![format!("Finish {title}")],
        interactive_exercises: exercises.iter().map(|s| (*s).to_owned()).collect(),
    }
}

#[async_trait::async_trait]
impl ProgressApi for FakeApi {
    async fn fetch_progress(&self) -> Result<ProgressSnapshot, ApiError> {
        self.check()?;
        Ok(self.snapshot.lock().unwrap().clone())
    }

    async fn complete_lesson(
        &self,
        lesson: LessonId,
        _at: DateTime<Utc>,
    ) -> Result<ProgressSnapshot, ApiError> {
        self.check()?;
        let mut snapshot = self.snapshot.lock().unwrap();
        snapshot.completed_lessons.push(lesson);
        snapshot.current_streak = snapshot.current_streak.max(1);
        Ok(snapshot.clone())
    }

    async fn add_achievement(&self, id: &AchievementId) -> Result<ProgressSnapshot, ApiError> {
        self.check()?;
        let mut snapshot = self.snapshot.lock().unwrap();
        snapshot.achievements.push(EarnedAchievement::new(id.clone()));
        snapshot.current_streak = snapshot.current_streak.max(1);
        Ok(snapshot.clone())
    }

    async fn complete_exercise(&self, _exercise: ExerciseId) -> Result<ExerciseAck, ApiError> {
        self.check()?;
        Ok(ExerciseAck::from_json(serde_json::json!({"status": "ok"})))
    }

    async fn list_lessons(&self) -> Result<Vec<Lesson>, ApiError> {
        Ok(vec![
            lesson(2, "Opening Principles", &["center-control", "piece-development"]),
            lesson(1, "Chess Basics", &["piece-movement", "board-setup"]),
        ])
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Option<Lesson>, ApiError> {
        Ok(self
            .list_lessons()
            .await?
            .into_iter()
            .find(|lesson| lesson.id == id))
    }
}

struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn achievements(&self) -> Arc<AchievementService> {
        self.services.achievements()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Clone, Copy)]
pub enum ViewKind {
    Lessons,
    Achievements,
    Exercise(&'static str),
    Board,
    /// Sidebar alone; board setup is finished once `go` is notified.
    SidebarAfterBoardSetup { go: &'static Notify },
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_effects_provider();
    use_live_progress_provider();
    rsx! {
        Router::<TestRoute> {}
        EffectsLayer {}
    }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Lessons => rsx! { LessonsView {} },
        ViewKind::Achievements => rsx! { AchievementsView {} },
        ViewKind::Exercise(slug) => rsx! { ExerciseView { slug: slug.to_owned() } },
        ViewKind::Board => rsx! { FreePlayView {} },
        ViewKind::SidebarAfterBoardSetup { .. } => rsx! { FinishBoardSetup {} },
    }
}

fn place(runner: &mut ExerciseRunner, square: &str, symbol: char) {
    runner.place_piece(parse_square(square).unwrap(), parse_piece(symbol).unwrap());
}

fn finish_board_setup(capabilities: ExerciseCapabilities) -> CompletionTask {
    let mut runner = ExerciseRunner::start(ExerciseId::BoardSetup, capabilities).unwrap();
    runner.verify();
    runner.next().unwrap();
    for file in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'] {
        place(&mut runner, &format!("{file}2"), 'P');
        place(&mut runner, &format!("{file}7"), 'p');
    }
    runner.next().unwrap();
    let back_rank = ['R', 'N', 'B', 'Q', 'K', 'B', 'N', 'R'];
    for (file, symbol) in ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'].into_iter().zip(back_rank) {
        place(&mut runner, &format!("{file}1"), symbol);
        place(&mut runner, &format!("{file}8"), symbol.to_ascii_lowercase());
    }
    runner.next().unwrap();
    runner.verify();
    match runner.next().unwrap() {
        NextStep::Finished(task) => task,
        _ => panic!("board setup should finish on its last step"),
    }
}

#[component]
fn FinishBoardSetup() -> Element {
    let ViewKind::SidebarAfterBoardSetup { go } = use_context::<ViewKind>() else {
        panic!("FinishBoardSetup needs its view kind");
    };
    let ctx = use_context::<AppContext>();
    let effects = use_context::<Effects>();
    let live = use_context::<LiveProgress>();
    use_hook(move || {
        spawn(async move {
            go.notified().await;
            let outbox = EffectOutbox::default();
            let sink: Arc<dyn Celebrations> = Arc::new(outbox.clone());
            let task = finish_board_setup(ctx.exercise_capabilities(sink));
            report_completion(task, outbox, effects, live).await;
        })
    });
    rsx! { Sidebar {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: Arc<FakeApi>,
}

impl ViewHarness {
    pub async fn settle(&mut self) {
        self.dom.rebuild_in_place();
        self.drive_async().await;
    }

    /// Polls pending tasks and re-renders without rebuilding.
    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn setup_view_harness(view: ViewKind, api: Arc<FakeApi>) -> ViewHarness {
    let progress_api: Arc<dyn ProgressApi> = Arc::clone(&api) as Arc<dyn ProgressApi>;
    let services = AppServices::with_api(progress_api, &Storage::in_memory(), fixed_clock());
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, api }
}
