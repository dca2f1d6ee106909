use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use daylog::cli::entries::LogArgs;
use daylog::cli::RangeArgs;
use daylog::config::DaylogConfig;
use daylog::{cli, server};

#[derive(Parser)]
#[command(name = "daylog", version, about = "Daily money, work, and stress log with streaks and trends")]
struct Cli {
    /// User to act as (defaults to storage.default_user)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Config file (defaults to ~/.daylog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP API
    Serve,
    /// Record or amend a day's entry
    Log(LogArgs),
    /// Show one day's entry
    Show {
        #[arg(default_value = "today")]
        date: String,
    },
    /// List entries in a date range
    List(RangeArgs),
    /// Delete one day's entry
    Delete { date: String },
    /// Totals and averages over a date range
    Summary(RangeArgs),
    /// One metric over a date range
    Trends {
        /// e.g. income_today, net_income_daily, stress_level
        metric: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Current and longest logging streaks
    Streak,
    /// Mint a bearer token for the HTTP API
    Token,
    /// Export all entries as JSON to stdout
    Export,
    /// Run database diagnostics
    Doctor,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DaylogConfig::load_from(path)?,
        None => DaylogConfig::load()?,
    };

    // Log to stderr so stdout stays clean for command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let user = cli.user.as_deref();
    match cli.command {
        Command::Serve => server::serve(config).await?,
        Command::Log(args) => cli::entries::log(&config, user, &args).await?,
        Command::Show { date } => cli::entries::show(&config, user, &date)?,
        Command::List(range) => cli::entries::list(&config, user, &range)?,
        Command::Delete { date } => cli::entries::delete(&config, user, &date)?,
        Command::Summary(range) => cli::stats::summary(&config, user, &range)?,
        Command::Trends { metric, range } => cli::stats::trends(&config, user, &metric, &range)?,
        Command::Streak => cli::stats::streak(&config, user)?,
        Command::Token => cli::token::token(&config, user)?,
        Command::Export => cli::export::export(&config, user)?,
        Command::Doctor => cli::doctor::doctor(&config)?,
    }

    Ok(())
}
