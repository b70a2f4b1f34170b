//! Weekly bundle identifiers and acquisition planning.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{MonthRange, Symbol};

/// Number of weekly bundles published per month.
pub const WEEKS_PER_MONTH: u8 = 5;

/// Identifies one weekly archive: one symbol, one week of one month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleKey {
    /// The currency pair.
    pub symbol: Symbol,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Week of the month (1-5).
    pub week: u8,
}

impl BundleKey {
    /// Creates a new bundle key.
    #[must_use]
    pub const fn new(symbol: Symbol, year: i32, month: u32, week: u8) -> Self {
        Self {
            symbol,
            year,
            month,
            week,
        }
    }

    /// Returns the English month name, e.g. `March`.
    #[must_use]
    pub fn month_name(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B").to_string())
            .unwrap_or_default()
    }
}

impl std::fmt::Display for BundleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{:02} week {}",
            self.symbol, self.year, self.month, self.week
        )
    }
}

/// Lists every bundle to request for the given months and symbols.
///
/// Ordered by month, then symbol, then week, so bundles of one symbol are
/// visited in chronological order.
#[must_use]
pub fn bundle_plan(range: &MonthRange, symbols: &[Symbol]) -> Vec<BundleKey> {
    let capacity = range.total_months() * symbols.len() * usize::from(WEEKS_PER_MONTH);
    let mut plan = Vec::with_capacity(capacity);
    for month in range.months() {
        for symbol in symbols {
            for week in 1..=WEEKS_PER_MONTH {
                plan.push(BundleKey::new(
                    symbol.clone(),
                    month.year(),
                    month.month(),
                    week,
                ));
            }
        }
    }
    plan
}
