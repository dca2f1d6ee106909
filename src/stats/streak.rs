//! Consecutive-day streaks over a user's full history.

use chrono::NaiveDate;
use serde::Serialize;

use crate::entries::DailyEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakInfo {
    /// Run ending at the latest entry up to today, or 0 once today and yesterday
    /// are both missed.
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Latest entry on or before today.
    pub last_entry_date: Option<NaiveDate>,
    pub total_entries: usize,
}

/// Compute streaks over ALL of a user's entries, sorted ascending by date.
///
/// A run grows when an entry falls exactly one day after the previous one and
/// restarts at 1 on any gap. The current streak is alive while the latest entry
/// is today or yesterday, which gives a user until the end of today to log.
/// Entries dated after `today` count toward the longest run only.
pub fn get_streak_info(entries: &[DailyEntry], today: NaiveDate) -> StreakInfo {
    let mut run: u32 = 0;
    let mut longest: u32 = 0;
    let mut previous: Option<NaiveDate> = None;
    let mut as_of_today: Option<(NaiveDate, u32)> = None;

    for entry in entries {
        let date = entry.entry_date;
        run = match previous {
            None => 1,
            Some(prev) => match (date - prev).num_days() {
                // same day twice: not a new day
                0 => run,
                1 => run + 1,
                _ => 1,
            },
        };
        longest = longest.max(run);
        previous = Some(date);
        if date <= today {
            as_of_today = Some((date, run));
        }
    }

    let current_streak = match as_of_today {
        Some((last, run)) if (today - last).num_days() <= 1 => run,
        _ => 0,
    };

    StreakInfo {
        current_streak,
        longest_streak: longest,
        last_entry_date: as_of_today.map(|(date, _)| date),
        total_entries: entries.len(),
    }
}
