pub mod doctor;
pub mod entries;
pub mod export;
pub mod stats;
pub mod token;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::auth::{users, User};
use crate::config::DaylogConfig;
use crate::db;
use crate::error::DaylogResult;
use crate::range::{local_today, parse_optional_day, DateRange};

/// An open database plus the user a command acts for.
pub struct Session {
    pub conn: Connection,
    pub user: User,
    pub today: NaiveDate,
}

impl Session {
    /// Open the configured database and resolve `username` (or the configured
    /// default user), creating the user on first use.
    pub fn open(config: &DaylogConfig, username: Option<&str>) -> Result<Self> {
        let db_path = config.resolved_db_path();
        let conn = db::open_database(&db_path)?;

        let username = username.unwrap_or(&config.storage.default_user);
        let user = users::get_or_create_user(&conn, username)
            .with_context(|| format!("failed to resolve user '{username}'"))?;
        tracing::debug!(user = %user.username, db = %db_path.display(), "session opened");

        Ok(Self {
            conn,
            user,
            today: local_today(),
        })
    }
}

/// `--start/--end/--days` shared by range commands.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    /// First day (YYYY-MM-DD, today, yesterday, or -N)
    #[arg(long)]
    pub start: Option<String>,
    /// Last day, defaults to today
    #[arg(long)]
    pub end: Option<String>,
    /// Days back from the end when --start is not given
    #[arg(long)]
    pub days: Option<u32>,
}

impl RangeArgs {
    pub fn resolve(&self, default_days: u32, today: NaiveDate) -> DaylogResult<DateRange> {
        DateRange::resolve(
            parse_optional_day(self.start.as_deref(), today)?,
            parse_optional_day(self.end.as_deref(), today)?,
            self.days,
            default_days,
            today,
        )
    }
}

/// Render an optional amount, `-` when absent.
pub(crate) fn format_optional(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
