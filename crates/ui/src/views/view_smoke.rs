use std::sync::Arc;
use std::sync::atomic::Ordering;

use chessedu_core::model::LessonId;
use tokio::sync::Notify;

use super::test_harness::{FakeApi, ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn lessons_view_lists_lessons_with_status() {
    let api = Arc::new(FakeApi::default());
    api.snapshot
        .lock()
        .unwrap()
        .completed_lessons
        .push(LessonId::new(1));
    let mut harness = setup_view_harness(ViewKind::Lessons, api);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Chess Basics"), "missing lesson in {html}");
    assert!(html.contains("Opening Principles"), "missing lesson in {html}");
    assert!(html.contains("Completed"), "missing status in {html}");
    assert!(html.contains("Lessons completed: 1"), "missing banner in {html}");
    assert!(html.contains("Chess Basics in depth"), "missing content in {html}");
    assert!(html.contains("Review"), "missing review action in {html}");
    let basics = html.find("Chess Basics").unwrap();
    let opening = html.find("Opening Principles").unwrap();
    assert!(basics < opening, "lessons not sorted in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lessons_view_survives_progress_failure() {
    let api = Arc::new(FakeApi::default());
    api.progress_down.store(true, Ordering::SeqCst);
    let mut harness = setup_view_harness(ViewKind::Lessons, api);
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Chess Basics"), "missing lesson in {html}");
    assert!(html.contains("Locked"), "missing locked lesson in {html}");
    assert!(!html.contains("Lessons completed"), "unexpected banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn achievements_view_shows_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Achievements, Arc::new(FakeApi::default()));
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Complete lessons to earn achievements!"),
        "missing empty message in {html}"
    );
    assert!(html.contains("???"), "missing locked preview in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn achievements_view_reports_offline_server() {
    let api = Arc::new(FakeApi::default());
    api.progress_down.store(true, Ordering::SeqCst);
    let mut harness = setup_view_harness(ViewKind::Achievements, api);
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("Could not reach the chess server"),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exercise_view_renders_first_step() {
    let mut harness = setup_view_harness(
        ViewKind::Exercise("piece-development"),
        Arc::new(FakeApi::default()),
    );
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("Piece Development"), "missing title in {html}");
    assert!(html.contains("Step 1 of 5: Knights First"), "missing step in {html}");
    assert!(html.contains("♘"), "missing knight in {html}");
    assert!(html.contains("Hint"), "missing controls in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn exercise_view_without_board_explains_itself() {
    let mut harness = setup_view_harness(
        ViewKind::Exercise("fork-practice"),
        Arc::new(FakeApi::default()),
    );
    harness.settle().await;
    let html = harness.render();

    assert!(
        html.contains("This exercise is not available yet."),
        "missing message in {html}"
    );
    assert!(html.contains("Back to lessons"), "missing link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn board_view_starts_from_the_initial_position() {
    let mut harness = setup_view_harness(ViewKind::Board, Arc::new(FakeApi::default()));
    harness.settle().await;
    let html = harness.render();

    assert!(html.contains("White to move"), "missing turn in {html}");
    assert!(html.contains("No moves yet"), "missing history in {html}");
    assert!(
        html.contains("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        "missing fen in {html}"
    );
    assert!(html.contains("Show hint"), "missing controls in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn sidebar_streak_follows_a_finished_exercise() {
    let go: &'static Notify = Box::leak(Box::new(Notify::new()));
    let api = Arc::new(FakeApi::default());
    let mut harness = setup_view_harness(ViewKind::SidebarAfterBoardSetup { go }, api.clone());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("🔥 0 day streak"), "missing streak in {html}");

    go.notify_one();
    harness.drive_async().await;
    let html = harness.render();

    assert_eq!(api.snapshot.lock().unwrap().current_streak, 1);
    assert!(html.contains("🔥 1 day streak"), "streak not refreshed in {html}");
}
