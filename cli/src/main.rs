use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use client::pages::analytics::AnalyticsPage;
use client::pages::home::HomePage;
use client::pages::login::{LoginMode, LoginPage};
use client::pages::results::ResultsPage;
use client::pages::{PageError, Route};
use client::state::auth::AuthState;
use client::{ApiClient, ApiError, ClientConfig};
use game::story::building_label;
use game::summary::{AnalyticsSummary, ResultsSummary};
use serde::Serialize;
use wire::Difficulty;

mod play;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `coderunner login` and pass --token or set CODERUNNER_TOKEN")]
    NotLoggedIn,
    #[error("no session id; play a game first or pass --session")]
    NoSession,
    #[error("{0}")]
    Login(#[from] client::pages::login::LoginError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid topic: {0}")]
    Topic(#[from] client::pages::home::UnknownTopic),
    #[error("i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl From<PageError> for CliError {
    fn from(err: PageError) -> Self {
        match err {
            PageError::Redirect(Route::Login) => Self::NotLoggedIn,
            PageError::Redirect(_) => Self::NoSession,
            PageError::Api(e) if e.is_unauthorized() => Self::NotLoggedIn,
            PageError::Api(e) => Self::Api(e),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "coderunner", about = "Code Runner terminal client")]
struct Cli {
    #[arg(long, env = "CODERUNNER_API_BASE_URL")]
    api_base_url: Option<String>,

    #[arg(long, env = "CODERUNNER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and print the bearer token.
    Login(Credentials),
    /// Create an account and print the bearer token.
    Register {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        username: String,
    },
    /// Show the logged-in user.
    Me,
    /// Show story progress, the current chapter and the city.
    Story,
    /// Play a session in the terminal.
    Play(PlayArgs),
    /// Show the results of a session.
    Results {
        #[arg(long)]
        session: String,
    },
    /// Show long-term analytics and the leaderboard.
    Analytics,
    /// Show the top players.
    Leaderboard {
        #[arg(long, default_value_t = client::net::analytics::DEFAULT_LEADERBOARD_LIMIT)]
        limit: u32,
    },
}

#[derive(Args, Debug)]
struct Credentials {
    #[arg(long)]
    email: String,
    #[arg(long, env = "CODERUNNER_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
pub(crate) struct PlayArgs {
    #[arg(long, default_value = game::consts::DEFAULT_TOPIC)]
    pub topic: String,

    #[arg(long, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,

    #[arg(long, help = "JPEG file or directory of JPEGs used as the camera")]
    pub frames: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_base_url.as_deref() {
        config = config.with_base_url(url);
    }
    let api = ApiClient::new(&config)?.with_token(cli.token);

    match cli.command {
        Command::Login(credentials) => run_auth(api, credentials, None).await,
        Command::Register { credentials, username } => run_auth(api, credentials, Some(username)).await,
        Command::Me => {
            let auth = logged_in(api).await?;
            print_json(&auth.user())
        }
        Command::Story => run_story(api).await,
        Command::Play(args) => play::run(api, &config, args).await,
        Command::Results { session } => {
            let page = ResultsPage::load(&api, Some(session.as_str())).await?;
            print_results(page.summary());
            Ok(())
        }
        Command::Analytics => {
            let auth = logged_in(api).await?;
            let page = AnalyticsPage::load(&auth).await?;
            print_analytics(page.summary());
            Ok(())
        }
        Command::Leaderboard { limit } => print_json(&api.leaderboard(limit).await?),
    }
}

async fn run_auth(api: ApiClient, credentials: Credentials, username: Option<String>) -> Result<(), CliError> {
    let mut auth = AuthState::new(api);
    let mut page = LoginPage::new(if username.is_some() { LoginMode::Register } else { LoginMode::Login });
    page.email = credentials.email;
    page.password = credentials.password;
    page.username = username.unwrap_or_default();
    page.submit(&mut auth).await?;

    if let Some(user) = auth.user() {
        eprintln!("logged in as {} (level {})", user.username, user.current_level);
    }
    if let Some(token) = auth.token() {
        println!("{token}");
    }
    Ok(())
}

/// Auth state resolved from the token, or [`CliError::NotLoggedIn`].
pub(crate) async fn logged_in(api: ApiClient) -> Result<AuthState, CliError> {
    let mut auth = AuthState::new(api);
    auth.init().await;
    if auth.is_authenticated() { Ok(auth) } else { Err(CliError::NotLoggedIn) }
}

async fn run_story(api: ApiClient) -> Result<(), CliError> {
    let auth = logged_in(api).await?;
    let mut home = HomePage::load(&auth).await?;
    if let Some(chapter) = home.take_intro() {
        println!("== {} ==", chapter.title);
        if !chapter.intro.is_empty() {
            println!("{}", chapter.intro);
        }
        println!();
    }
    let city = home.city();
    println!(
        "NeoCity: {}/{} buildings restored ({:.0}%)",
        city.restored_count(),
        city.total(),
        city.progress_percent()
    );
    for (building, restored) in city.tiles() {
        println!("  [{}] {}", if restored { "x" } else { " " }, building_label(building));
    }
    Ok(())
}

pub(crate) fn print_results(summary: &ResultsSummary) {
    println!("Level {}  XP {}", summary.level, summary.total_xp);
    println!(
        "Solved {}/{}  accuracy {:.1}%  hints {}",
        summary.solved, summary.attempted, summary.accuracy, summary.hints_used
    );
    if let Some(dominant) = summary.dominant_emotion() {
        println!(
            "Mostly {} {} ({} of {} checks)",
            dominant.emotion.emoji(),
            dominant.emotion,
            dominant.count,
            summary.total_checks
        );
    }
    for count in &summary.emotions {
        println!("  {:<12} {:>3}  {:.0}%", count.emotion.label(), count.count, count.percent_of_checks);
    }
    for achievement in &summary.achievements {
        println!("* {}: {}", achievement.title(), achievement.description());
    }
}

fn print_analytics(summary: &AnalyticsSummary) {
    println!("{}  level {}  XP {}", summary.username, summary.level, summary.total_xp);
    println!(
        "Solved {}/{}  accuracy {:.1}%  streak {}",
        summary.solved, summary.attempted, summary.accuracy, summary.streak
    );
    println!("Time {} min total, {} s per question", summary.total_minutes, summary.average_seconds);
    println!("Best difficulty {}", summary.best_difficulty.as_deref().unwrap_or("N/A"));
    for share in &summary.emotions {
        println!("  {} {:<12} {:>4}  {:.1}%", share.emotion.emoji(), share.emotion.label(), share.count, share.percent);
    }
    if !summary.leaderboard.is_empty() {
        println!("Leaderboard");
        for entry in &summary.leaderboard {
            println!("  #{:<3} {:<20} level {:<3} {} XP", entry.rank, entry.username, entry.level, entry.xp);
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
