use chrono::{DateTime, Utc};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "learning-journey", version, about = "Learning Journey CLI")]
struct Cli {
    /// Act as if the current time were this RFC 3339 instant
    #[arg(long, global = true, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Learning goal management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Log today as learned or frozen
    Log {
        #[command(subcommand)]
        action: commands::log::LogAction,
    },
    /// Print today's streak status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply any pending daily or abandonment reset
    Resume,
    /// Show outcomes for the current week
    Week,
    /// Forfeit the current streak
    Reset,
    /// Show recent engine events
    History {
        /// Number of events to show
        #[arg(long, default_value = "20")]
        limit: u32,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("LEARNING_JOURNEY_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let now = cli.at.unwrap_or_else(Utc::now);
    let result = match cli.command {
        Commands::Goal { action } => commands::goal::run(action, now),
        Commands::Log { action } => commands::log::run(action, now),
        Commands::Status { json } => commands::status::run_status(json, now),
        Commands::Resume => commands::status::run_resume(now),
        Commands::Week => commands::status::run_week(now),
        Commands::Reset => commands::status::run_reset(now),
        Commands::History { limit } => commands::status::run_history(limit),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "learning-journey",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
