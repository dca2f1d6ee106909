//! Date-range resolution for the calling layer.
//!
//! The statistics engine never reads the clock. CLI commands and HTTP handlers
//! turn user input ("last 30 days", `yesterday`, `-3`, `2024-01-31`) into an
//! explicit inclusive [`DateRange`] here, with `today` passed in.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::error::{DaylogError, DaylogResult};

/// Inclusive calendar range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DaylogResult<Self> {
        if start > end {
            return Err(DaylogError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// `days` calendar days ending on (and including) `end`.
    pub fn last_n_days(days: u32, end: NaiveDate) -> DaylogResult<Self> {
        if days == 0 {
            return Err(DaylogError::InvalidRange("day count must be at least 1".into()));
        }
        let start = end
            .checked_sub_days(Days::new(u64::from(days) - 1))
            .ok_or_else(|| DaylogError::InvalidRange(format!("{days} days is too far back")))?;
        Ok(Self { start, end })
    }

    /// Resolve optional user bounds.
    ///
    /// A missing end defaults to `today`; a missing start is derived from `days`
    /// (or `default_days`) counted back from the end.
    pub fn resolve(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        days: Option<u32>,
        default_days: u32,
        today: NaiveDate,
    ) -> DaylogResult<Self> {
        let end = end.unwrap_or(today);
        match start {
            Some(start) => Self::new(start, end),
            None => Self::last_n_days(days.unwrap_or(default_days), end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Parse a day as `today`, `yesterday`, `-N` (N days ago), or `YYYY-MM-DD`.
pub fn parse_day(text: &str, today: NaiveDate) -> DaylogResult<NaiveDate> {
    let text = text.trim();
    let invalid = || DaylogError::InvalidDate(text.to_string());

    match text.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return today.checked_sub_days(Days::new(1)).ok_or_else(invalid),
        _ => {}
    }

    if let Some(offset) = text.strip_prefix('-') {
        let days: u64 = offset.parse().map_err(|_| invalid())?;
        return today.checked_sub_days(Days::new(days)).ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| invalid())
}

/// [`parse_day`] for a day being logged: dates after `today` are rejected.
pub fn parse_log_day(text: &str, today: NaiveDate) -> DaylogResult<NaiveDate> {
    let date = parse_day(text, today)?;
    if date > today {
        return Err(DaylogError::validation(
            "entry_date",
            format!("{date} is after today ({today})"),
        ));
    }
    Ok(date)
}

/// The current calendar day in the machine's local timezone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// [`parse_day`] over an optional value.
pub fn parse_optional_day(text: Option<&str>, today: NaiveDate) -> DaylogResult<Option<NaiveDate>> {
    text.map(|t| parse_day(t, today)).transpose()
}
