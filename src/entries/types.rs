//! Daily entry record and its writable input.
//!
//! [`DailyEntry`] is the value type handed to the statistics engine. [`EntryInput`]
//! is what callers write; [`EntryInput::validate`] enforces the field ranges before
//! anything reaches the store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DaylogError, DaylogResult};

pub const MIN_STRESS: u8 = 1;
pub const MAX_STRESS: u8 = 10;
pub const DEFAULT_STRESS: u8 = 5;
pub const MAX_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// One user's record for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// UUID v7 primary key.
    pub id: String,
    pub user_id: String,
    /// Unique per user.
    pub entry_date: NaiveDate,
    pub income_today: Decimal,
    pub side_income: Decimal,
    pub bills_due_today: Decimal,
    pub food_spent: Decimal,
    pub gas_spent: Decimal,
    /// In `[0, 24]`.
    pub hours_worked: Decimal,
    /// In `[1, 10]`.
    pub stress_level: u8,
    pub cash_on_hand: Option<Decimal>,
    pub bank_balance: Option<Decimal>,
    pub debts_total: Option<Decimal>,
    pub notes: Option<String>,
    pub priority: Option<String>,
    /// Motivational message generated after the entry was saved.
    pub ai_feedback: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-modification timestamp.
    pub updated_at: String,
}

impl DailyEntry {
    /// `income_today + side_income`.
    pub fn total_income(&self) -> Decimal {
        self.income_today + self.side_income
    }

    /// Discretionary spend: `food_spent + gas_spent`.
    pub fn spent(&self) -> Decimal {
        self.food_spent + self.gas_spent
    }

    /// Income minus bills and discretionary spend for this day.
    pub fn net_income(&self) -> Decimal {
        self.total_income() - self.bills_due_today - self.spent()
    }
}

/// Writable fields of an entry. Absent JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryInput {
    pub income_today: Decimal,
    pub side_income: Decimal,
    pub bills_due_today: Decimal,
    pub food_spent: Decimal,
    pub gas_spent: Decimal,
    pub hours_worked: Decimal,
    pub stress_level: u8,
    pub cash_on_hand: Option<Decimal>,
    pub bank_balance: Option<Decimal>,
    pub debts_total: Option<Decimal>,
    pub notes: Option<String>,
    pub priority: Option<String>,
}

impl Default for EntryInput {
    fn default() -> Self {
        Self {
            income_today: Decimal::ZERO,
            side_income: Decimal::ZERO,
            bills_due_today: Decimal::ZERO,
            food_spent: Decimal::ZERO,
            gas_spent: Decimal::ZERO,
            hours_worked: Decimal::ZERO,
            stress_level: DEFAULT_STRESS,
            cash_on_hand: None,
            bank_balance: None,
            debts_total: None,
            notes: None,
            priority: None,
        }
    }
}

impl From<&DailyEntry> for EntryInput {
    fn from(entry: &DailyEntry) -> Self {
        Self {
            income_today: entry.income_today,
            side_income: entry.side_income,
            bills_due_today: entry.bills_due_today,
            food_spent: entry.food_spent,
            gas_spent: entry.gas_spent,
            hours_worked: entry.hours_worked,
            stress_level: entry.stress_level,
            cash_on_hand: entry.cash_on_hand,
            bank_balance: entry.bank_balance,
            debts_total: entry.debts_total,
            notes: entry.notes.clone(),
            priority: entry.priority.clone(),
        }
    }
}

impl EntryInput {
    /// Check every field constraint, reporting the first violation.
    ///
    /// Optional balances may be negative (an overdrawn account); debts may not.
    pub fn validate(&self) -> DaylogResult<()> {
        let amounts = [
            ("income_today", self.income_today),
            ("side_income", self.side_income),
            ("bills_due_today", self.bills_due_today),
            ("food_spent", self.food_spent),
            ("gas_spent", self.gas_spent),
        ];
        for (field, value) in amounts {
            non_negative(field, value)?;
        }

        if let Some(debts) = self.debts_total {
            non_negative("debts_total", debts)?;
        }

        if self.hours_worked < Decimal::ZERO || self.hours_worked > MAX_HOURS {
            return Err(DaylogError::validation(
                "hours_worked",
                format!("must be between 0 and 24, got {}", self.hours_worked),
            ));
        }

        if !(MIN_STRESS..=MAX_STRESS).contains(&self.stress_level) {
            return Err(DaylogError::validation(
                "stress_level",
                format!(
                    "must be between {MIN_STRESS} and {MAX_STRESS}, got {}",
                    self.stress_level
                ),
            ));
        }

        Ok(())
    }

    /// Blank notes/priority collapse to `None`.
    pub fn normalized(mut self) -> Self {
        self.notes = self.notes.filter(|s| !s.trim().is_empty());
        self.priority = self.priority.filter(|s| !s.trim().is_empty());
        self
    }
}

#[cfg(test)]
impl DailyEntry {
    /// Unsaved entry for `date` (`YYYY-MM-DD`) carrying `input`'s values.
    pub(crate) fn sample(date: &str, input: EntryInput) -> Self {
        Self {
            id: format!("id-{date}"),
            user_id: "user".into(),
            entry_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
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
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

fn non_negative(field: &'static str, value: Decimal) -> DaylogResult<()> {
    if value < Decimal::ZERO {
        return Err(DaylogError::validation(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}
