#![allow(dead_code)]

use chrono::NaiveDate;
use daylog::auth::{users, User};
use daylog::db;
use daylog::entries::store;
use daylog::entries::{DailyEntry, EntryInput};
use rusqlite::Connection;
use rust_decimal::Decimal;

pub const TEST_SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

/// Open a fresh in-memory database with the schema applied.
pub fn test_db() -> Connection {
    db::open_memory_database().unwrap()
}

pub fn test_user(conn: &Connection, name: &str) -> User {
    users::get_or_create_user(conn, name).unwrap()
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Input with the given income and defaults elsewhere.
pub fn income(amount: Decimal) -> EntryInput {
    EntryInput {
        income_today: amount,
        ..Default::default()
    }
}

/// Upsert an entry through the store. Returns the stored entry.
pub fn log_entry(conn: &mut Connection, user: &User, date: &str, input: EntryInput) -> DailyEntry {
    store::upsert_entry(conn, &user.id, day(date), &input)
        .unwrap()
        .entry
}

/// Build an entry value without touching a database.
pub fn entry(user_id: &str, date: &str, input: EntryInput) -> DailyEntry {
    DailyEntry {
        id: format!("{user_id}-{date}"),
        user_id: user_id.to_string(),
        entry_date: day(date),
        income_today: input.income_today,
        side_income: input.side_income,
        bills_due_today: input.bills_due_today,
        food_spent: input.food_spent,
        gas_spent: input.gas_spent,
        hours_worked: input.hours_worked,
        stress_level: input.stress_level,
        cash_on_hand: input.cash_on_hand,
        bank_balance: input.bank_balance,
        debts_total: input.debts_total,
        notes: input.notes,
        priority: input.priority,
        ai_feedback: None,
        created_at: "2024-01-01T00:00:00+00:00".to_string(),
        updated_at: "2024-01-01T00:00:00+00:00".to_string(),
    }
}

/// One default entry per date.
pub fn entries_on(user_id: &str, dates: &[&str]) -> Vec<DailyEntry> {
    dates
        .iter()
        .map(|d| entry(user_id, d, EntryInput::default()))
        .collect()
}
