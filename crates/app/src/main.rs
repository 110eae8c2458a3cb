use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AchievementService, ApiConfig, AppServices, Clock, LessonService, ProgressService,
};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug, Error)]
enum ArgsError {
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
}

/// Desktop client for the chess lessons server.
#[derive(Debug, Parser)]
#[command(name = "chess-edu", version)]
struct Args {
    /// Base URL of the lessons and progress server.
    #[arg(long, env = "CHESS_EDU_API_URL", default_value = "http://127.0.0.1:5001")]
    api_url: String,

    /// `SQLite` database used to mirror progress for offline use.
    #[arg(
        long = "db",
        env = "CHESS_EDU_DB_URL",
        default_value = "sqlite://chess-edu.sqlite3"
    )]
    db_url: String,

    /// Per-request timeout for server calls.
    #[arg(long, default_value_t = 10)]
    request_timeout_secs: u64,
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
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

fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_owned();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_owned(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_owned(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.db_url.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: args.db_url }.into());
    }
    let db_url = normalize_sqlite_url(&args.db_url);

    // Open + migrate SQLite at startup so the services stay storage-agnostic.
    prepare_sqlite_file(&db_url)?;
    let api = ApiConfig::new(
        args.api_url,
        Duration::from_secs(args.request_timeout_secs),
    );
    let services = AppServices::new_sqlite(&db_url, api, Clock::system()).await?;
    info!(db = %db_url, "progress mirror ready");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Chess Edu")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        tracing::error!(error = %err, "chess-edu failed to start");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_urls_pass_through() {
        assert_eq!(normalize_sqlite_url("sqlite::memory:"), "sqlite::memory:");
        assert_eq!(
            normalize_sqlite_url("sqlite:///tmp/chess.sqlite3"),
            "sqlite:///tmp/chess.sqlite3"
        );
    }

    #[test]
    fn bare_paths_become_absolute_urls() {
        assert_eq!(
            normalize_sqlite_url("sqlite:/var/chess.sqlite3"),
            "sqlite:///var/chess.sqlite3"
        );
        let relative = normalize_sqlite_url("chess.sqlite3");
        assert!(relative.starts_with("sqlite:///"));
        assert!(relative.ends_with("/chess.sqlite3"));
    }

    #[test]
    fn prepare_rejects_non_file_urls() {
        assert!(prepare_sqlite_file("postgres://db").is_err());
        assert!(prepare_sqlite_file("sqlite://").is_err());
        assert!(prepare_sqlite_file("sqlite::memory:").is_ok());
    }

    #[test]
    fn args_parse_flags() {
        let args = Args::try_parse_from([
            "chess-edu",
            "--api-url",
            "http://lessons.test",
            "--db",
            "sqlite::memory:",
            "--request-timeout-secs",
            "3",
        ])
        .unwrap();
        assert_eq!(args.api_url, "http://lessons.test");
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.request_timeout_secs, 3);
    }

    #[test]
    fn args_reject_bad_timeout() {
        assert!(Args::try_parse_from(["chess-edu", "--request-timeout-secs", "soon"]).is_err());
    }
}
