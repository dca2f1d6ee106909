//! Per-metric time series.
//!
//! A trend is one [`TrendPoint`] per entry that has a value for the metric, in
//! entry order. Missing days stay missing; consumers get a sparse series.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::StatsError;
use crate::entries::DailyEntry;
use crate::range::DateRange;

/// Metrics a trend can be drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    StressLevel,
    IncomeToday,
    SideIncome,
    BillsDueToday,
    FoodSpent,
    GasSpent,
    HoursWorked,
    CashOnHand,
    BankBalance,
    DebtsTotal,
    /// Derived per entry: income + side income − bills − food − gas.
    NetIncomeDaily,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Self::StressLevel,
        Self::IncomeToday,
        Self::SideIncome,
        Self::BillsDueToday,
        Self::FoodSpent,
        Self::GasSpent,
        Self::HoursWorked,
        Self::CashOnHand,
        Self::BankBalance,
        Self::DebtsTotal,
        Self::NetIncomeDaily,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StressLevel => "stress_level",
            Self::IncomeToday => "income_today",
            Self::SideIncome => "side_income",
            Self::BillsDueToday => "bills_due_today",
            Self::FoodSpent => "food_spent",
            Self::GasSpent => "gas_spent",
            Self::HoursWorked => "hours_worked",
            Self::CashOnHand => "cash_on_hand",
            Self::BankBalance => "bank_balance",
            Self::DebtsTotal => "debts_total",
            Self::NetIncomeDaily => "net_income_daily",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Metric::as_str).collect()
    }

    /// This metric's value on `entry`, `None` if the entry did not record it.
    pub fn value(&self, entry: &DailyEntry) -> Option<Decimal> {
        match self {
            Self::StressLevel => Some(Decimal::from(entry.stress_level)),
            Self::IncomeToday => Some(entry.income_today),
            Self::SideIncome => Some(entry.side_income),
            Self::BillsDueToday => Some(entry.bills_due_today),
            Self::FoodSpent => Some(entry.food_spent),
            Self::GasSpent => Some(entry.gas_spent),
            Self::HoursWorked => Some(entry.hours_worked),
            Self::CashOnHand => entry.cash_on_hand,
            Self::BankBalance => entry.bank_balance,
            Self::DebtsTotal => entry.debts_total,
            Self::NetIncomeDaily => Some(entry.net_income()),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Metric {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| StatsError::UnknownMetric(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// Trend for a metric given by name. Unknown names fail with
/// [`StatsError::UnknownMetric`] regardless of the entries.
pub fn get_trends(
    entries: &[DailyEntry],
    metric: &str,
    range: &DateRange,
) -> Result<Vec<TrendPoint>, StatsError> {
    let metric: Metric = metric.parse()?;
    Ok(trend_series(entries, metric, range))
}

/// Points for entries inside `range` that have a value for `metric`.
pub fn trend_series(entries: &[DailyEntry], metric: Metric, range: &DateRange) -> Vec<TrendPoint> {
    entries
        .iter()
        .filter(|e| range.contains(e.entry_date))
        .filter_map(|e| {
            metric.value(e).map(|value| TrendPoint {
                date: e.entry_date,
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entries::EntryInput;
    use rust_decimal_macros::dec;

    fn range(start: &str, end: &str) -> DateRange {
        DateRange::new(
            NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
        )
        .unwrap()
    }

    fn entries() -> Vec<DailyEntry> {
        vec![
            DailyEntry::sample(
                "2024-01-01",
                EntryInput {
                    income_today: dec!(100),
                    bills_due_today: dec!(30),
                    food_spent: dec!(10),
                    stress_level: 3,
                    bank_balance: Some(dec!(900)),
                    ..Default::default()
                },
            ),
            DailyEntry::sample(
                "2024-01-03",
                EntryInput {
                    income_today: dec!(20),
                    side_income: dec!(5),
                    gas_spent: dec!(40),
                    stress_level: 8,
                    ..Default::default()
                },
            ),
            DailyEntry::sample(
                "2024-01-09",
                EntryInput {
                    stress_level: 6,
                    ..Default::default()
                },
            ),
        ]
    }

    #[test]
    fn test_every_metric_name_parses_back() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        let err = get_trends(&[], "bogus_metric", &range("2024-01-01", "2024-01-31")).unwrap_err();
        assert_eq!(err, StatsError::UnknownMetric("bogus_metric".into()));
        assert!(err.to_string().contains("net_income_daily"));
    }

    #[test]
    fn test_stress_trend_is_sparse_and_ordered() {
        let points = get_trends(&entries(), "stress_level", &range("2024-01-01", "2024-01-31")).unwrap();
        let dates: Vec<String> = points.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-03", "2024-01-09"]);
        assert_eq!(points[1].value, dec!(8));
    }

    #[test]
    fn test_net_income_daily_is_derived() {
        let points =
            get_trends(&entries(), "net_income_daily", &range("2024-01-01", "2024-01-03")).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, dec!(60));
        assert_eq!(points[1].value, dec!(-15));
    }

    #[test]
    fn test_optional_metric_skips_absent_values() {
        let points = trend_series(&entries(), Metric::BankBalance, &range("2024-01-01", "2024-01-31"));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].value, dec!(900));
    }

    #[test]
    fn test_range_is_applied() {
        let points = trend_series(&entries(), Metric::IncomeToday, &range("2024-01-02", "2024-01-08"));
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].date.to_string(), "2024-01-03");
    }
}
