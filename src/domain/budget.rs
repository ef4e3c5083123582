//! Spending limits per expense category.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::domain::common::DateWindow;
use crate::domain::schedule::BudgetPeriod;
use crate::errors::EngineError;

/// Dates a budget limit covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BudgetScope {
    /// One explicit window.
    Fixed(DateWindow),
    /// Whichever calendar period contains the current date.
    Recurring(BudgetPeriod),
}

impl BudgetScope {
    pub fn window_on(&self, today: NaiveDate) -> Result<DateWindow, EngineError> {
        match *self {
            BudgetScope::Fixed(window) => Ok(window),
            BudgetScope::Recurring(period) => period.window_containing(today),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryBudget {
    pub category: String,
    pub limit: Decimal,
    pub scope: BudgetScope,
}

impl CategoryBudget {
    pub fn new(category: impl Into<String>, limit: Decimal, window: DateWindow) -> Self {
        Self {
            category: category.into(),
            limit,
            scope: BudgetScope::Fixed(window),
        }
    }

    pub fn periodic(category: impl Into<String>, limit: Decimal, period: BudgetPeriod) -> Self {
        Self {
            category: category.into(),
            limit,
            scope: BudgetScope::Recurring(period),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetStatus {
    pub category: String,
    pub window: DateWindow,
    pub limit: Decimal,
    pub spent: Decimal,
    /// Negative when the limit is exceeded.
    pub remaining: Decimal,
    pub percent_used: Decimal,
    pub over_budget: bool,
}

impl BudgetStatus {
    /// Percentages past the decimal range read as `Decimal::MAX`.
    pub fn from_parts(budget: &CategoryBudget, window: DateWindow, spent: Decimal) -> Self {
        let percent_used = if budget.limit > Decimal::ZERO {
            spent
                .checked_div(budget.limit)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::MAX)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };
        Self {
            category: budget.category.clone(),
            window,
            limit: budget.limit,
            spent,
            remaining: budget.limit.saturating_sub(spent),
            percent_used,
            over_budget: spent > budget.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    #[test]
    fn huge_spending_does_not_overflow_percentages() {
        let window = DateWindow::new(day(1, 1), day(2, 1)).unwrap();
        let budget = CategoryBudget::new("Food", dec!(0.01), window);
        let status = BudgetStatus::from_parts(&budget, window, Decimal::MAX);
        assert_eq!(status.percent_used, Decimal::MAX);
        assert_eq!(status.remaining, Decimal::MIN);
        assert!(status.over_budget);
    }

    #[test]
    fn recurring_scope_follows_the_calendar() {
        let scope = BudgetScope::Recurring(BudgetPeriod::Monthly);
        let window = scope.window_on(day(2, 14)).unwrap();
        assert_eq!((window.start, window.end), (day(2, 1), day(3, 1)));

        let fixed = DateWindow::new(day(1, 1), day(1, 8)).unwrap();
        assert_eq!(BudgetScope::Fixed(fixed).window_on(day(6, 1)).unwrap(), fixed);
    }
}
