use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::Identity;
use services::{
    AppServices, Clock, HttpSourceConfig, LeaderboardService, QuizLoopService, StatsService,
    UploadService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    InvalidDbUrl { raw: String },
    InvalidUser { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidUser { raw } => write!(f, "invalid --user value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Parser)]
#[command(name = "quiz", version, about = "Korean exam practice quizzes")]
struct Cli {
    /// SQLite database URL or path
    #[arg(long = "db", env = "QUIZ_DB_URL", default_value = "sqlite://quiz.sqlite3", global = true)]
    db_url: String,

    /// Sign this email in on launch
    #[arg(long, env = "QUIZ_USER", global = true)]
    user: Option<String>,

    /// Serve questions from `<url>/questions/<subject>.json` instead of the local bank
    #[arg(long = "questions-url", env = "QUIZ_QUESTIONS_BASE_URL", global = true)]
    questions_url: Option<String>,

    /// Show the admin view
    #[arg(long, env = "QUIZ_ADMIN", global = true)]
    admin: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Launch the desktop app (default)
    Ui,
    /// Upload a question JSON file into the local bank
    Import {
        /// JSON file holding one question object or an array of them
        file: PathBuf,
    },
}

struct DesktopApp {
    identity: Option<Identity>,
    admin: bool,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn initial_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }

    fn admin_enabled(&self) -> bool {
        self.admin
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn stats(&self) -> Arc<StatsService> {
        self.services.stats()
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        self.services.leaderboard()
    }

    fn uploads(&self) -> Arc<UploadService> {
        self.services.uploads()
    }
}

fn normalize_sqlite_url(raw: &str) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_string();
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
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
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
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

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,services=info,storage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.db_url.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: cli.db_url }.into());
    }
    let db_url = normalize_sqlite_url(&cli.db_url);
    let identity = cli
        .user
        .as_deref()
        .map(|raw| {
            Identity::from_email(raw).map_err(|_| ArgsError::InvalidUser {
                raw: raw.to_string(),
            })
        })
        .transpose()?;
    let http = cli
        .questions_url
        .as_deref()
        .and_then(HttpSourceConfig::from_base_url);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, Clock::default_clock(), http).await?;

    match cli.command.unwrap_or(Command::Ui) {
        Command::Ui => {
            tracing::info!(
                db = %db_url,
                admin = cli.admin,
                signed_in = identity.is_some(),
                remote_questions = services.remote_questions(),
                "launching desktop app"
            );
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                identity,
                admin: cli.admin,
                services,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("달곰 국어")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Import { file } => {
            let json = tokio::fs::read_to_string(&file).await?;
            let summary = services.uploads().upload_json(&json).await?;
            println!(
                "imported {} question(s) from {} ({} image(s) compressed)",
                summary.count(),
                file.display(),
                summary.images_compressed
            );
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
