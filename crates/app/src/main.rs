use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppearanceService, Clock, QuizLoopService, SnapshotWriter};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
const DB_URL_ENV: &str = "QUIZ_DB_URL";
const MEMORY_DB_URL: &str = "sqlite::memory:";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
    appearance: Arc<AppearanceService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn appearance(&self) -> Arc<AppearanceService> {
        Arc::clone(&self.appearance)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Backend {
    Sqlite(String),
    InMemory,
}

#[derive(Debug, PartialEq, Eq)]
enum Parsed {
    Run(Backend),
    Help,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  flashcard-quiz [--db <sqlite_url>] [--in-memory]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {DB_URL_ENV}   database url when --db is not given");
    eprintln!("  RUST_LOG      log filter (default: info)");
}

/// Parse argv (without the program name). `env_db_url` is the value of
/// `QUIZ_DB_URL`, if set.
fn parse_args(
    args: impl IntoIterator<Item = String>,
    env_db_url: Option<String>,
) -> Result<Parsed, ArgsError> {
    let mut args = args.into_iter();
    let mut db_url = env_db_url
        .filter(|value| !value.trim().is_empty())
        .map_or_else(|| DEFAULT_DB_URL.to_string(), |value| normalize_sqlite_url(&value));
    let mut in_memory = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let value = require_value(&mut args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                db_url = normalize_sqlite_url(&value);
            }
            "--in-memory" => in_memory = true,
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    if in_memory {
        Ok(Parsed::Run(Backend::InMemory))
    } else {
        Ok(Parsed::Run(Backend::Sqlite(db_url)))
    }
}

/// Turn a `--db` value into an absolute `sqlite://` url. Bare paths and
/// `sqlite:`-prefixed paths resolve against the working directory.
fn normalize_sqlite_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw == MEMORY_DB_URL || raw.starts_with("sqlite://") {
        return raw.to_string();
    }
    let path = Path::new(raw.strip_prefix("sqlite:").unwrap_or(raw));
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    format!("sqlite://{}", absolute.display())
}

/// Create the database file and its directory so the first launch can connect.
fn ensure_db_file(db_url: &str) -> std::io::Result<()> {
    let Some(path) = db_url.strip_prefix("sqlite://").map(Path::new) else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(drop)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

async fn open_storage(backend: &Backend) -> Result<Storage, Box<dyn std::error::Error>> {
    match backend {
        Backend::InMemory => {
            tracing::info!("running without persistence");
            Ok(Storage::in_memory())
        }
        Backend::Sqlite(db_url) => {
            ensure_db_file(db_url)?;
            let storage = Storage::sqlite(db_url).await?;
            tracing::info!(url = %db_url, "sqlite storage opened");
            Ok(storage)
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = parse_args(std::env::args().skip(1), std::env::var(DB_URL_ENV).ok())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;
    let backend = match parsed {
        Parsed::Help => {
            print_usage();
            return Ok(());
        }
        Parsed::Run(backend) => backend,
    };

    // Keep storage setup in the binary so core and services stay backend-agnostic.
    let storage = open_storage(&backend).await?;

    let clock = Clock::system();
    let writer = SnapshotWriter::spawn(Arc::clone(&storage.snapshots));
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        quiz_loop: Arc::new(QuizLoopService::new(clock, writer)),
        appearance: Arc::new(AppearanceService::new(Arc::clone(&storage.preferences))),
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Flashcard Quiz")
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
    init_tracing();
    if let Err(err) = run().await {
        tracing::error!(error = %err, "startup failed");
        eprintln!("{err}");
        std::process::exit(2);
    }
}
