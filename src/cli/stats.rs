use anyhow::Result;

use super::{format_optional, RangeArgs, Session};
use crate::config::DaylogConfig;
use crate::entries::EntrySource;
use crate::stats::{compute_summary, get_streak_info, get_trends};

/// Totals and averages over a range.
pub fn summary(config: &DaylogConfig, user: Option<&str>, range_args: &RangeArgs) -> Result<()> {
    let session = Session::open(config, user)?;
    let range = range_args.resolve(config.stats.default_days, session.today)?;
    let entries = session.conn.fetch_entries_for_user(
        &session.user.id,
        Some(range.start),
        Some(range.end),
    )?;
    let s = compute_summary(&entries);

    println!("Summary {} to {} ({} days)", range.start, range.end, range.num_days());
    println!("{}", "=".repeat(40));
    println!("  Entries:             {}", s.entry_count);
    println!();
    println!("  Total income:        {}", s.total_income);
    println!("  Average income:      {}", format_optional(s.average_income));
    println!("  Total bills:         {}", s.total_bills);
    println!("  Average bills:       {}", format_optional(s.average_bills));
    println!("  Total food:          {}", s.total_food);
    println!("  Total gas:           {}", s.total_gas);
    println!("  Net income:          {}", s.net_income);
    println!();
    println!("  Avg hours worked:    {}", format_optional(s.average_hours_worked));
    println!("  Avg stress:          {}", format_optional(s.average_stress_level));
    println!("  Avg cash on hand:    {}", format_optional(s.average_cash_on_hand));
    println!("  Avg bank balance:    {}", format_optional(s.average_bank_balance));
    println!("  Avg debts total:     {}", format_optional(s.average_debts_total));
    Ok(())
}

/// One metric over a range, one line per day.
pub fn trends(
    config: &DaylogConfig,
    user: Option<&str>,
    metric: &str,
    range_args: &RangeArgs,
) -> Result<()> {
    let session = Session::open(config, user)?;
    let range = range_args.resolve(config.stats.default_days, session.today)?;
    let entries = session.conn.fetch_entries_for_user(
        &session.user.id,
        Some(range.start),
        Some(range.end),
    )?;
    let points = get_trends(&entries, metric, &range)?;

    println!("{metric} from {} to {}", range.start, range.end);
    println!("{}", "=".repeat(40));
    if points.is_empty() {
        println!("  (no data)");
    }
    for point in &points {
        println!("  {}  {:>12}", point.date, point.value);
    }
    Ok(())
}

/// Current and longest consecutive-day streaks.
pub fn streak(config: &DaylogConfig, user: Option<&str>) -> Result<()> {
    let session = Session::open(config, user)?;
    let entries = session.conn.fetch_all_entries_for_user(&session.user.id)?;
    let info = get_streak_info(&entries, session.today);

    println!("Current streak:   {} days", info.current_streak);
    println!("Longest streak:   {} days", info.longest_streak);
    println!("Total entries:    {}", info.total_entries);
    match info.last_entry_date {
        Some(date) => println!("Last entry:       {date}"),
        None => println!("Last entry:       (none yet)"),
    }
    if info.current_streak == 0 && info.total_entries > 0 {
        println!();
        println!("Log today with `daylog log` to start a new streak.");
    }
    Ok(())
}
