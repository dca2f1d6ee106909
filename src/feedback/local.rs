//! Rule-based feedback that needs no network.

use anyhow::Result;
use rust_decimal::Decimal;

use super::FeedbackProvider;
use crate::entries::DailyEntry;

/// Hours at or above which a day counts as a long shift.
const LONG_SHIFT_HOURS: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

pub struct LocalFeedbackProvider;

impl FeedbackProvider for LocalFeedbackProvider {
    fn generate(&self, entry: &DailyEntry) -> Result<String> {
        let mut parts = vec![stress_message(entry.stress_level).to_string()];

        let net = entry.net_income();
        if net > Decimal::ZERO {
            parts.push(format!("You finished the day {} ahead.", net.round_dp(2)));
        } else if net < Decimal::ZERO {
            parts.push(format!(
                "Spending outran income by {} today. One day doesn't make the month.",
                net.abs().round_dp(2)
            ));
        }

        if entry.hours_worked >= LONG_SHIFT_HOURS {
            parts.push("That was a long shift; make room to recharge.".to_string());
        }

        Ok(parts.join(" "))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

fn stress_message(stress: u8) -> &'static str {
    match stress {
        0..=3 => "Low stress today. Protect that calm.",
        4..=6 => "A steady day. Consistency is how progress happens.",
        _ => "Heavy day. Rest counts as progress too, so be kind to yourself tonight.",
    }
}
