//! CLI `log`, `show`, `list`, and `delete` commands.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;

use super::{format_optional, RangeArgs, Session};
use crate::config::DaylogConfig;
use crate::entries::store::{self, UpsertResult};
use crate::entries::{DailyEntry, EntryInput, EntrySource};
use crate::feedback::{self, generate_feedback};
use crate::range::{parse_day, parse_log_day, DateRange};

/// Fields for `daylog log`. Omitted flags keep the value already stored for
/// that day, or the default when the day is new.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Day to record (YYYY-MM-DD, today, yesterday, or -N)
    #[arg(long, default_value = "today")]
    pub date: String,
    #[arg(long)]
    pub income: Option<Decimal>,
    #[arg(long)]
    pub side_income: Option<Decimal>,
    #[arg(long)]
    pub bills: Option<Decimal>,
    #[arg(long)]
    pub food: Option<Decimal>,
    #[arg(long)]
    pub gas: Option<Decimal>,
    #[arg(long)]
    pub hours: Option<Decimal>,
    /// Stress from 1 (calm) to 10
    #[arg(long)]
    pub stress: Option<u8>,
    #[arg(long)]
    pub cash: Option<Decimal>,
    #[arg(long)]
    pub bank: Option<Decimal>,
    #[arg(long)]
    pub debts: Option<Decimal>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
}

impl LogArgs {
    /// Overlay the given flags on `base`.
    pub fn apply(&self, base: EntryInput) -> EntryInput {
        EntryInput {
            income_today: self.income.unwrap_or(base.income_today),
            side_income: self.side_income.unwrap_or(base.side_income),
            bills_due_today: self.bills.unwrap_or(base.bills_due_today),
            food_spent: self.food.unwrap_or(base.food_spent),
            gas_spent: self.gas.unwrap_or(base.gas_spent),
            hours_worked: self.hours.unwrap_or(base.hours_worked),
            stress_level: self.stress.unwrap_or(base.stress_level),
            cash_on_hand: self.cash.or(base.cash_on_hand),
            bank_balance: self.bank.or(base.bank_balance),
            debts_total: self.debts.or(base.debts_total),
            notes: self.notes.clone().or(base.notes),
            priority: self.priority.clone().or(base.priority),
        }
    }
}

/// Record (or amend) a day, then print it with feedback.
pub async fn log(config: &DaylogConfig, user: Option<&str>, args: &LogArgs) -> Result<()> {
    let provider = feedback::create_provider(&config.feedback)?;
    let mut session = Session::open(config, user)?;
    let date = parse_log_day(&args.date, session.today)?;

    let base = store::get_entry(&session.conn, &session.user.id, date)?
        .map(|existing| EntryInput::from(&existing))
        .unwrap_or_default();
    let input = args.apply(base);

    let UpsertResult { mut entry, created } =
        store::upsert_entry(&mut session.conn, &session.user.id, date, &input)?;

    if let Some(text) = generate_feedback(provider, entry.clone()).await {
        if store::set_feedback(&session.conn, &entry.id, &entry.updated_at, &text)? {
            entry.ai_feedback = Some(text);
        }
    }

    println!("{} entry for {}", if created { "Created" } else { "Updated" }, date);
    println!();
    print_entry(&entry);
    Ok(())
}

/// Print one day's entry.
pub fn show(config: &DaylogConfig, user: Option<&str>, day: &str) -> Result<()> {
    let session = Session::open(config, user)?;
    let date = parse_day(day, session.today)?;

    match store::get_entry(&session.conn, &session.user.id, date)? {
        Some(entry) => print_entry(&entry),
        None => println!("No entry for {date}."),
    }
    Ok(())
}

/// Table of entries in a range.
pub fn list(config: &DaylogConfig, user: Option<&str>, range_args: &RangeArgs) -> Result<()> {
    let session = Session::open(config, user)?;
    let range: DateRange = range_args.resolve(config.stats.default_days, session.today)?;
    let entries = session.conn.fetch_entries_for_user(
        &session.user.id,
        Some(range.start),
        Some(range.end),
    )?;

    println!("Entries {} to {} ({})", range.start, range.end, session.user.username);
    println!("{}", "=".repeat(60));
    if entries.is_empty() {
        println!("  (none)");
        return Ok(());
    }

    println!(
        "  {:<12} {:>10} {:>10} {:>10} {:>6} {:>6}",
        "date", "income", "spent", "net", "hours", "stress"
    );
    for e in &entries {
        println!(
            "  {:<12} {:>10} {:>10} {:>10} {:>6} {:>6}",
            e.entry_date,
            e.total_income(),
            e.bills_due_today + e.spent(),
            e.net_income(),
            e.hours_worked,
            e.stress_level
        );
    }
    println!();
    println!("{} entries", entries.len());
    Ok(())
}

/// Delete one day's entry.
pub fn delete(config: &DaylogConfig, user: Option<&str>, day: &str) -> Result<()> {
    let session = Session::open(config, user)?;
    let date = parse_day(day, session.today)?;

    if store::delete_entry(&session.conn, &session.user.id, date)? {
        tracing::info!(user = %session.user.username, date = %date, "entry deleted");
        println!("Deleted entry for {date}.");
    } else {
        println!("No entry for {date}.");
    }
    Ok(())
}

fn print_entry(entry: &DailyEntry) {
    println!("Date:           {}", entry.entry_date);
    println!("Income:         {}", entry.income_today);
    println!("Side income:    {}", entry.side_income);
    println!("Bills due:      {}", entry.bills_due_today);
    println!("Food:           {}", entry.food_spent);
    println!("Gas:            {}", entry.gas_spent);
    println!("Net:            {}", entry.net_income());
    println!("Hours worked:   {}", entry.hours_worked);
    println!("Stress:         {}/10", entry.stress_level);
    println!("Cash on hand:   {}", format_optional(entry.cash_on_hand));
    println!("Bank balance:   {}", format_optional(entry.bank_balance));
    println!("Debts total:    {}", format_optional(entry.debts_total));
    if let Some(ref priority) = entry.priority {
        println!("Priority:       {priority}");
    }
    if let Some(ref notes) = entry.notes {
        println!("Notes:          {notes}");
    }
    if let Some(ref feedback) = entry.ai_feedback {
        println!();
        println!("{feedback}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn log_flags_overlay_existing_values() {
        let base = EntryInput {
            income_today: dec!(100),
            food_spent: dec!(12.50),
            stress_level: 7,
            notes: Some("first pass".into()),
            ..Default::default()
        };
        let args = LogArgs {
            gas: Some(dec!(30)),
            stress: Some(4),
            ..Default::default()
        };

        let merged = args.apply(base);
        assert_eq!(merged.income_today, dec!(100));
        assert_eq!(merged.food_spent, dec!(12.50));
        assert_eq!(merged.gas_spent, dec!(30));
        assert_eq!(merged.stress_level, 4);
        assert_eq!(merged.notes.as_deref(), Some("first pass"));
    }

    #[test]
    fn log_flags_on_new_day_use_defaults() {
        let args = LogArgs {
            income: Some(dec!(80)),
            ..Default::default()
        };
        let input = args.apply(EntryInput::default());
        assert_eq!(input.income_today, dec!(80));
        assert_eq!(input.stress_level, 5);
        assert!(input.validate().is_ok());
    }

    fn config_in(dir: &tempfile::TempDir, provider: &str) -> DaylogConfig {
        let mut config = DaylogConfig::default();
        config.storage.db_path = dir.path().join("daylog.db").display().to_string();
        config.feedback.provider = provider.into();
        config
    }

    #[tokio::test]
    async fn test_log_with_bad_feedback_config_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, "bogus");
        let args = LogArgs {
            date: "today".into(),
            income: Some(dec!(50)),
            ..Default::default()
        };

        assert!(log(&config, Some("alice"), &args).await.is_err());
        assert!(!config.resolved_db_path().exists());
    }

    #[tokio::test]
    async fn test_log_rejects_future_day() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, "none");
        let args = LogArgs {
            date: "2999-01-01".into(),
            ..Default::default()
        };

        assert!(log(&config, Some("alice"), &args).await.is_err());
        let session = Session::open(&config, Some("alice")).unwrap();
        assert_eq!(store::count_entries(&session.conn, &session.user.id).unwrap(), 0);
    }
}
