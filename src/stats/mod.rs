//! Aggregation engine: summaries, trend series, and streaks over daily entries.
//!
//! Every function here is a pure, single-pass computation over a caller-supplied
//! slice. Nothing reads storage or the clock; where "today" matters it is a
//! parameter.

pub mod streak;
pub mod summary;
pub mod trends;

pub use streak::{get_streak_info, StreakInfo};
pub use summary::{compute_summary, StatisticsSummary};
pub use trends::{get_trends, trend_series, Metric, TrendPoint};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("unknown metric: {0} (expected one of: {known})", known = Metric::names().join(", "))]
    UnknownMetric(String),
}
