use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dialed_application::PracticeTracker;
use dialed_core::config::DialedConfig;
use dialed_core::scoring::ScoringStyle;
use dialed_core::session::HistoryFilter;
use dialed_core::user::UserRole;
use dialed_infrastructure::ConfigService;

mod commands;

#[derive(Parser)]
#[command(name = "dialed")]
#[command(about = "DIALED - disc golf putting practice tracker", long_about = None)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a standard practice session round by round
    Practice {
        /// Scoring style for this session (defaults to the saved setting)
        #[arg(long)]
        style: Option<ScoringStyle>,
        /// Starting distance in feet
        #[arg(long)]
        distance: Option<u32>,
        /// What to do with a same-day session: ask, merge or keep
        #[arg(long, default_value = "ask")]
        on_duplicate: commands::practice::DuplicateChoice,
    },
    /// Play Around the World
    World,
    /// Score a league night
    League,
    /// Browse and edit the session history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show statistics
    Stats {
        #[command(subcommand)]
        view: Option<StatsView>,
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or change settings
    Settings {
        #[arg(long)]
        style: Option<ScoringStyle>,
        /// Mark onboarding as done
        #[arg(long)]
        onboarded: bool,
    },
    /// Show or change the dashboard role
    Role { role: Option<UserRole> },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List sessions, newest first
    List {
        #[arg(long, default_value = "all")]
        filter: HistoryFilter,
    },
    /// Delete a session
    Delete {
        id: i64,
        #[arg(long)]
        yes: bool,
    },
    /// Merge two same-day practice sessions into the first one
    Merge { existing: i64, incoming: i64 },
    /// Delete every session
    Clear {
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum StatsView {
    Streak,
    Practice,
    League,
    World,
    Pro,
}

fn load_config(path: Option<PathBuf>) -> Result<DialedConfig> {
    let service = match path {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new().context("Failed to resolve config location")?,
    };
    service
        .load()
        .with_context(|| format!("Failed to load {}", service.path().display()))
}

fn init_logging(config: &DialedConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config)?;
    init_logging(&config);

    let tracker = PracticeTracker::from_config(&config).context("Failed to open storage")?;
    let user = tracker.sign_in().await.context("Failed to sign in")?;
    tracing::debug!(uid = %user.uid, "signed in");

    commands::release::show_if_unseen(&tracker).await?;

    match cli.command {
        Commands::Practice {
            style,
            distance,
            on_duplicate,
        } => commands::practice::run(&tracker, style, distance, on_duplicate).await?,
        Commands::World => commands::world::run(&tracker).await?,
        Commands::League => commands::league::run(&tracker).await?,
        Commands::History { action } => match action {
            HistoryAction::List { filter } => commands::history::list(&tracker, filter).await?,
            HistoryAction::Delete { id, yes } => {
                commands::history::delete(&tracker, id, yes).await?
            }
            HistoryAction::Merge { existing, incoming } => {
                commands::history::merge(&tracker, existing, incoming).await?
            }
            HistoryAction::Clear { yes } => commands::history::clear(&tracker, yes).await?,
        },
        Commands::Stats { view, json } => commands::stats::show(&tracker, view, json).await?,
        Commands::Settings { style, onboarded } => {
            commands::settings::run(&tracker, style, onboarded).await?
        }
        Commands::Role { role } => commands::settings::role(&tracker, role).await?,
    }

    Ok(())
}
