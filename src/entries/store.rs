//! SQLite persistence for daily entries.
//!
//! [`upsert_entry`] is the single write path: it validates, then inserts or updates
//! the user's row for that date inside a transaction. Reads always return entries
//! ascending by date.

use chrono::{NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

use super::types::{DailyEntry, EntryInput};
use crate::error::{DaylogError, DaylogResult};

const ENTRY_COLUMNS: &str = "id, user_id, entry_date, income_today, side_income, \
     bills_due_today, food_spent, gas_spent, hours_worked, stress_level, cash_on_hand, \
     bank_balance, debts_total, notes, priority, ai_feedback, created_at, updated_at";

/// Result returned from an upsert.
#[derive(Debug, Serialize)]
pub struct UpsertResult {
    pub entry: DailyEntry,
    /// `true` if a new row was inserted, `false` if an existing one was replaced.
    pub created: bool,
}

/// Insert or replace the user's entry for `date`.
///
/// On update the original `id` and `created_at` are kept and any previous
/// `ai_feedback` is cleared, since it described the old values.
pub fn upsert_entry(
    conn: &mut Connection,
    user_id: &str,
    date: NaiveDate,
    input: &EntryInput,
) -> DaylogResult<UpsertResult> {
    input.validate()?;
    let input = input.clone().normalized();

    let tx = conn.transaction()?;
    let now = Utc::now().to_rfc3339();
    let date_key = date.to_string();

    let existing: Option<String> = tx
        .query_row(
            "SELECT id FROM daily_entries WHERE user_id = ?1 AND entry_date = ?2",
            params![user_id, date_key],
            |row| row.get(0),
        )
        .optional()?;

    let (id, created) = match existing {
        Some(id) => {
            tx.execute(
                "UPDATE daily_entries SET income_today = ?1, side_income = ?2, \
                 bills_due_today = ?3, food_spent = ?4, gas_spent = ?5, hours_worked = ?6, \
                 stress_level = ?7, cash_on_hand = ?8, bank_balance = ?9, debts_total = ?10, \
                 notes = ?11, priority = ?12, ai_feedback = NULL, updated_at = ?13 \
                 WHERE id = ?14",
                params![
                    input.income_today.to_string(),
                    input.side_income.to_string(),
                    input.bills_due_today.to_string(),
                    input.food_spent.to_string(),
                    input.gas_spent.to_string(),
                    input.hours_worked.to_string(),
                    input.stress_level,
                    input.cash_on_hand.map(|d| d.to_string()),
                    input.bank_balance.map(|d| d.to_string()),
                    input.debts_total.map(|d| d.to_string()),
                    input.notes,
                    input.priority,
                    now,
                    id,
                ],
            )?;
            (id, false)
        }
        None => {
            let id = uuid::Uuid::now_v7().to_string();
            tx.execute(
                "INSERT INTO daily_entries (id, user_id, entry_date, income_today, side_income, \
                 bills_due_today, food_spent, gas_spent, hours_worked, stress_level, cash_on_hand, \
                 bank_balance, debts_total, notes, priority, created_at, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?16)",
                params![
                    id,
                    user_id,
                    date_key,
                    input.income_today.to_string(),
                    input.side_income.to_string(),
                    input.bills_due_today.to_string(),
                    input.food_spent.to_string(),
                    input.gas_spent.to_string(),
                    input.hours_worked.to_string(),
                    input.stress_level,
                    input.cash_on_hand.map(|d| d.to_string()),
                    input.bank_balance.map(|d| d.to_string()),
                    input.debts_total.map(|d| d.to_string()),
                    input.notes,
                    input.priority,
                    now,
                ],
            )?;
            (id, true)
        }
    };

    let entry = tx.query_row(
        &format!("SELECT {ENTRY_COLUMNS} FROM daily_entries WHERE id = ?1"),
        params![id],
        row_to_entry,
    )?;
    tx.commit()?;

    tracing::debug!(entry_id = %entry.id, date = %date, created, "entry upserted");
    Ok(UpsertResult { entry, created })
}

/// The user's entry for `date`, if any.
pub fn get_entry(
    conn: &Connection,
    user_id: &str,
    date: NaiveDate,
) -> DaylogResult<Option<DailyEntry>> {
    let entry = conn
        .query_row(
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM daily_entries WHERE user_id = ?1 AND entry_date = ?2"
            ),
            params![user_id, date.to_string()],
            row_to_entry,
        )
        .optional()?;
    Ok(entry)
}

/// Entries for one user within optional inclusive bounds, ascending by date.
pub fn fetch_entries(
    conn: &Connection,
    user_id: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> DaylogResult<Vec<DailyEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ENTRY_COLUMNS} FROM daily_entries \
         WHERE user_id = ?1 \
           AND (?2 IS NULL OR entry_date >= ?2) \
           AND (?3 IS NULL OR entry_date <= ?3) \
         ORDER BY entry_date ASC"
    ))?;

    let entries = stmt
        .query_map(
            params![
                user_id,
                start.map(|d| d.to_string()),
                end.map(|d| d.to_string())
            ],
            row_to_entry,
        )?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(user_id, count = entries.len(), "fetched entries");
    Ok(entries)
}

/// Delete the user's entry for `date`. Returns `false` if there was none.
pub fn delete_entry(conn: &Connection, user_id: &str, date: NaiveDate) -> DaylogResult<bool> {
    let rows = conn.execute(
        "DELETE FROM daily_entries WHERE user_id = ?1 AND entry_date = ?2",
        params![user_id, date.to_string()],
    )?;
    Ok(rows > 0)
}

/// Attach generated feedback to an entry, provided it still holds the values
/// stamped `updated_at`. Returns `false` when a newer write replaced them.
pub fn set_feedback(
    conn: &Connection,
    entry_id: &str,
    updated_at: &str,
    feedback: &str,
) -> DaylogResult<bool> {
    let rows = conn.execute(
        "UPDATE daily_entries SET ai_feedback = ?1 WHERE id = ?2 AND updated_at = ?3",
        params![feedback, entry_id, updated_at],
    )?;
    if rows > 0 {
        return Ok(true);
    }

    let exists: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM daily_entries WHERE id = ?1",
            params![entry_id],
            |row| row.get(0),
        )
        .optional()?;
    match exists {
        Some(_) => {
            tracing::debug!(entry_id, "entry changed before feedback was attached");
            Ok(false)
        }
        None => Err(DaylogError::not_found("entry", entry_id)),
    }
}

pub fn count_entries(conn: &Connection, user_id: &str) -> DaylogResult<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM daily_entries WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

/// Map a row selected with [`ENTRY_COLUMNS`] to a [`DailyEntry`].
fn row_to_entry(row: &Row) -> rusqlite::Result<DailyEntry> {
    Ok(DailyEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        entry_date: date_at(row, 2)?,
        income_today: decimal_at(row, 3)?,
        side_income: decimal_at(row, 4)?,
        bills_due_today: decimal_at(row, 5)?,
        food_spent: decimal_at(row, 6)?,
        gas_spent: decimal_at(row, 7)?,
        hours_worked: decimal_at(row, 8)?,
        stress_level: row.get(9)?,
        cash_on_hand: optional_decimal_at(row, 10)?,
        bank_balance: optional_decimal_at(row, 11)?,
        debts_total: optional_decimal_at(row, 12)?,
        notes: row.get(13)?,
        priority: row.get(14)?,
        ai_feedback: row.get(15)?,
        created_at: row.get(16)?,
        updated_at: row.get(17)?,
    })
}

fn date_at(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let text: String = row.get(idx)?;
    NaiveDate::parse_from_str(&text, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn decimal_at(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    parse_decimal(idx, &text)
}

fn optional_decimal_at(row: &Row, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| parse_decimal(idx, &t)).transpose()
}

fn parse_decimal(idx: usize, text: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::get_or_create_user;
    use crate::db;
    use rust_decimal_macros::dec;

    fn setup() -> (Connection, String) {
        let conn = db::open_memory_database().unwrap();
        let user = get_or_create_user(&conn, "sam").unwrap();
        (conn, user.id)
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_insert_then_update_keeps_identity() {
        let (mut conn, user_id) = setup();
        let first = upsert_entry(
            &mut conn,
            &user_id,
            day("2024-03-01"),
            &EntryInput {
                income_today: dec!(100.25),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(first.created);
        assert_eq!(first.entry.income_today, dec!(100.25));
        assert!(set_feedback(&conn, &first.entry.id, &first.entry.updated_at, "nice").unwrap());

        let second = upsert_entry(
            &mut conn,
            &user_id,
            day("2024-03-01"),
            &EntryInput {
                income_today: dec!(80),
                stress_level: 9,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!second.created);
        assert_eq!(second.entry.id, first.entry.id);
        assert_eq!(second.entry.created_at, first.entry.created_at);
        assert_eq!(second.entry.stress_level, 9);
        assert_eq!(second.entry.ai_feedback, None);
        assert_eq!(count_entries(&conn, &user_id).unwrap(), 1);
    }

    #[test]
    fn test_invalid_input_is_not_written() {
        let (mut conn, user_id) = setup();
        let result = upsert_entry(
            &mut conn,
            &user_id,
            day("2024-03-01"),
            &EntryInput {
                stress_level: 0,
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(DaylogError::Validation { .. })));
        assert_eq!(count_entries(&conn, &user_id).unwrap(), 0);
    }

    #[test]
    fn test_decimal_precision_round_trips() {
        let (mut conn, user_id) = setup();
        upsert_entry(
            &mut conn,
            &user_id,
            day("2024-03-01"),
            &EntryInput {
                food_spent: dec!(0.10),
                gas_spent: dec!(0.20),
                bank_balance: Some(dec!(1234567.89)),
                ..Default::default()
            },
        )
        .unwrap();

        let entry = get_entry(&conn, &user_id, day("2024-03-01")).unwrap().unwrap();
        assert_eq!(entry.spent(), dec!(0.30));
        assert_eq!(entry.bank_balance, Some(dec!(1234567.89)));
        assert_eq!(entry.cash_on_hand, None);
    }

    #[test]
    fn test_fetch_range_is_inclusive_and_sorted() {
        let (mut conn, user_id) = setup();
        for d in ["2024-03-05", "2024-03-01", "2024-03-03", "2024-03-02"] {
            upsert_entry(&mut conn, &user_id, day(d), &EntryInput::default()).unwrap();
        }

        let dates: Vec<String> = fetch_entries(
            &conn,
            &user_id,
            Some(day("2024-03-02")),
            Some(day("2024-03-05")),
        )
        .unwrap()
        .iter()
        .map(|e| e.entry_date.to_string())
        .collect();
        assert_eq!(dates, vec!["2024-03-02", "2024-03-03", "2024-03-05"]);

        let all = fetch_entries(&conn, &user_id, None, None).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].entry_date, day("2024-03-01"));
    }

    #[test]
    fn test_delete_entry() {
        let (mut conn, user_id) = setup();
        upsert_entry(&mut conn, &user_id, day("2024-03-01"), &EntryInput::default()).unwrap();

        assert!(delete_entry(&conn, &user_id, day("2024-03-01")).unwrap());
        assert!(!delete_entry(&conn, &user_id, day("2024-03-01")).unwrap());
        assert!(get_entry(&conn, &user_id, day("2024-03-01")).unwrap().is_none());
    }

    #[test]
    fn test_set_feedback_unknown_entry() {
        let (conn, _) = setup();
        let err = set_feedback(&conn, "missing", "", "hi").unwrap_err();
        assert!(matches!(err, DaylogError::NotFound { .. }));
    }

    #[test]
    fn test_set_feedback_skips_replaced_values() {
        let (mut conn, user_id) = setup();
        let first = upsert_entry(&mut conn, &user_id, day("2024-03-01"), &EntryInput::default())
            .unwrap()
            .entry;
        let stale_stamp = "2000-01-01T00:00:00+00:00";
        conn.execute(
            "UPDATE daily_entries SET updated_at = ?1 WHERE id = ?2",
            params![stale_stamp, first.id],
        )
        .unwrap();

        assert!(!set_feedback(&conn, &first.id, &first.updated_at, "for old values").unwrap());
        let entry = get_entry(&conn, &user_id, day("2024-03-01")).unwrap().unwrap();
        assert_eq!(entry.ai_feedback, None);

        assert!(set_feedback(&conn, &first.id, stale_stamp, "current").unwrap());
        let entry = get_entry(&conn, &user_id, day("2024-03-01")).unwrap().unwrap();
        assert_eq!(entry.ai_feedback.as_deref(), Some("current"));
    }
}
