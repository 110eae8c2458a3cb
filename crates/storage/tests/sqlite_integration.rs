use chessedu_core::model::{AchievementId, EarnedAchievement, LessonId, ProgressSnapshot};
use chessedu_core::time::fixed_now;
use chrono::Duration;
use storage::repository::{ProgressMirrorRepository, Storage};
use storage::sqlite::SqliteRepository;

fn snapshot() -> ProgressSnapshot {
    ProgressSnapshot {
        completed_lessons: vec![LessonId::new(2), LessonId::new(1)],
        achievements: vec![
            EarnedAchievement {
                id: AchievementId::new("first_lesson").unwrap(),
                title: Some("First Step".into()),
                description: None,
            },
            EarnedAchievement::new(AchievementId::new("board_setup").unwrap()),
        ],
        current_streak: 3,
        completed_objectives: vec!["2_0".into(), "2_1".into()],
    }
}

#[tokio::test]
async fn sqlite_mirror_starts_empty() {
    let repo = SqliteRepository::open("sqlite:file:memdb_mirror_empty?mode=memory&cache=shared")
        .await
        .expect("open");

    assert!(repo.load_snapshot().await.unwrap().is_none());
}

#[tokio::test]
async fn sqlite_mirror_round_trips_snapshot_in_server_order() {
    let repo =
        SqliteRepository::open("sqlite:file:memdb_mirror_roundtrip?mode=memory&cache=shared")
        .await
        .expect("open");

    let expected = snapshot();
    repo.save_snapshot(&expected, fixed_now()).await.unwrap();

    let mirrored = repo.load_snapshot().await.unwrap().expect("mirrored");
    assert_eq!(mirrored.snapshot, expected);
    assert_eq!(mirrored.saved_at, fixed_now());
}

#[tokio::test]
async fn sqlite_mirror_save_replaces_children() {
    let repo =
        SqliteRepository::open("sqlite:file:memdb_mirror_replace?mode=memory&cache=shared")
        .await
        .expect("open");

    repo.save_snapshot(&snapshot(), fixed_now()).await.unwrap();
    let later = fixed_now() + Duration::hours(1);
    let shrunk = ProgressSnapshot {
        completed_lessons: vec![LessonId::new(1)],
        ..ProgressSnapshot::default()
    };
    repo.save_snapshot(&shrunk, later).await.unwrap();

    let mirrored = repo.load_snapshot().await.unwrap().expect("mirrored");
    assert_eq!(mirrored.snapshot, shrunk);
    assert_eq!(mirrored.saved_at, later);
}

#[tokio::test]
async fn reopening_keeps_the_mirror() {
    let url = "sqlite:file:memdb_mirror_reopen?mode=memory&cache=shared";
    let first = SqliteRepository::open(url).await.expect("first open");
    first.save_snapshot(&snapshot(), fixed_now()).await.unwrap();

    let second = SqliteRepository::open(url).await.expect("second open");
    let mirrored = second.load_snapshot().await.unwrap().expect("mirrored");
    assert_eq!(mirrored.snapshot, snapshot());
}

#[tokio::test]
async fn open_creates_a_missing_database_file() {
    let path = std::env::temp_dir().join(format!("chess-edu-mirror-{}.sqlite3", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let repo = SqliteRepository::open(&format!("sqlite://{}", path.display()))
        .await
        .expect("open");
    repo.save_snapshot(&snapshot(), fixed_now()).await.unwrap();
    assert!(path.exists());

    drop(repo);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn storage_sqlite_wires_progress_mirror() {
    let storage = Storage::sqlite("sqlite:file:memdb_mirror_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .progress_mirror
        .save_snapshot(&snapshot(), fixed_now())
        .await
        .unwrap();
    let mirrored = storage.progress_mirror.load_snapshot().await.unwrap();
    assert_eq!(mirrored.map(|m| m.snapshot.current_streak), Some(3));
}
