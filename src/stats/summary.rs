use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::entries::DailyEntry;

/// Decimal places kept on averages.
const AVERAGE_DP: u32 = 2;

/// Totals and averages over a set of entries.
///
/// Averages are `None` when there is nothing to average, never a division by zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub entry_count: usize,
    /// Σ(income_today + side_income)
    pub total_income: Decimal,
    pub average_income: Option<Decimal>,
    pub total_bills: Decimal,
    pub average_bills: Option<Decimal>,
    pub total_food: Decimal,
    pub total_gas: Decimal,
    /// total_income − total_bills − Σ(food + gas)
    pub net_income: Decimal,
    pub average_hours_worked: Option<Decimal>,
    pub average_stress_level: Option<Decimal>,
    /// Averaged only over entries that recorded the field.
    pub average_cash_on_hand: Option<Decimal>,
    pub average_bank_balance: Option<Decimal>,
    pub average_debts_total: Option<Decimal>,
}

/// Summarize `entries`. An empty slice yields zero totals and no averages.
pub fn compute_summary(entries: &[DailyEntry]) -> StatisticsSummary {
    let mut total_income = Decimal::ZERO;
    let mut total_bills = Decimal::ZERO;
    let mut total_food = Decimal::ZERO;
    let mut total_gas = Decimal::ZERO;
    let mut total_hours = Decimal::ZERO;
    let mut total_stress = Decimal::ZERO;
    let mut cash = OptionalMean::default();
    let mut bank = OptionalMean::default();
    let mut debts = OptionalMean::default();

    for entry in entries {
        total_income += entry.total_income();
        total_bills += entry.bills_due_today;
        total_food += entry.food_spent;
        total_gas += entry.gas_spent;
        total_hours += entry.hours_worked;
        total_stress += Decimal::from(entry.stress_level);
        cash.push(entry.cash_on_hand);
        bank.push(entry.bank_balance);
        debts.push(entry.debts_total);
    }

    let count = entries.len();
    StatisticsSummary {
        entry_count: count,
        total_income,
        average_income: mean(total_income, count),
        total_bills,
        average_bills: mean(total_bills, count),
        total_food,
        total_gas,
        net_income: total_income - total_bills - total_food - total_gas,
        average_hours_worked: mean(total_hours, count),
        average_stress_level: mean(total_stress, count),
        average_cash_on_hand: cash.finish(),
        average_bank_balance: bank.finish(),
        average_debts_total: debts.finish(),
    }
}

fn mean(total: Decimal, count: usize) -> Option<Decimal> {
    if count == 0 {
        return None;
    }
    let avg = total / Decimal::from(count as u64);
    Some(avg.round_dp_with_strategy(AVERAGE_DP, RoundingStrategy::MidpointAwayFromZero))
}

#[derive(Default)]
struct OptionalMean {
    total: Decimal,
    present: usize,
}

impl OptionalMean {
    fn push(&mut self, value: Option<Decimal>) {
        if let Some(v) = value {
            self.total += v;
            self.present += 1;
        }
    }

    fn finish(self) -> Option<Decimal> {
        mean(self.total, self.present)
    }
}
