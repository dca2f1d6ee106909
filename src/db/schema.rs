//! SQL DDL for all daylog tables.
//!
//! Defines the `users`, `daily_entries`, and `schema_meta` tables. All DDL uses
//! `IF NOT EXISTS` for idempotent initialization. Monetary columns are TEXT so
//! fixed-point decimals round-trip without passing through a float.

use rusqlite::Connection;

/// Version stamped into `schema_meta` for `daylog doctor`.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

-- One row per user per calendar day
CREATE TABLE IF NOT EXISTS daily_entries (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    entry_date TEXT NOT NULL,
    income_today TEXT NOT NULL DEFAULT '0',
    side_income TEXT NOT NULL DEFAULT '0',
    bills_due_today TEXT NOT NULL DEFAULT '0',
    food_spent TEXT NOT NULL DEFAULT '0',
    gas_spent TEXT NOT NULL DEFAULT '0',
    hours_worked TEXT NOT NULL DEFAULT '0',
    stress_level INTEGER NOT NULL CHECK(stress_level >= 1 AND stress_level <= 10),
    cash_on_hand TEXT,
    bank_balance TEXT,
    debts_total TEXT,
    notes TEXT,
    priority TEXT,
    ai_feedback TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    UNIQUE(user_id, entry_date)
);

CREATE INDEX IF NOT EXISTS idx_entries_user_date ON daily_entries(user_id, entry_date);

CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

/// Read the stamped schema version, `0` if unreadable.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row(
        "SELECT value FROM schema_meta WHERE key = 'schema_version'",
        [],
        |row| {
            let val: String = row.get(0)?;
            Ok(val.parse::<u32>().unwrap_or(0))
        },
    )
}
