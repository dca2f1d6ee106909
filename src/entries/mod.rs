//! Daily entries: the record type, its SQLite store, and the read-side
//! [`EntrySource`] interface the statistics commands fetch through.

pub mod store;
pub mod types;

pub use types::{DailyEntry, EntryInput};

use chrono::NaiveDate;
use rusqlite::Connection;

use crate::error::DaylogResult;

/// Read access to a user's entries, returned as plain values sorted ascending by date.
pub trait EntrySource {
    /// Entries within optional inclusive bounds.
    fn fetch_entries_for_user(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DaylogResult<Vec<DailyEntry>>;

    /// Full history, as streak computation needs.
    fn fetch_all_entries_for_user(&self, user_id: &str) -> DaylogResult<Vec<DailyEntry>> {
        self.fetch_entries_for_user(user_id, None, None)
    }
}

impl EntrySource for Connection {
    fn fetch_entries_for_user(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DaylogResult<Vec<DailyEntry>> {
        store::fetch_entries(self, user_id, start, end)
    }
}

/// Any slice of entries is a source; the store is not required.
impl EntrySource for [DailyEntry] {
    fn fetch_entries_for_user(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> DaylogResult<Vec<DailyEntry>> {
        let mut entries: Vec<DailyEntry> = self
            .iter()
            .filter(|e| e.user_id == user_id)
            .filter(|e| start.map_or(true, |s| e.entry_date >= s))
            .filter(|e| end.map_or(true, |d| e.entry_date <= d))
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.entry_date);
        Ok(entries)
    }
}
