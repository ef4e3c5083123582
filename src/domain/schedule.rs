//! Calendar cadences: how often a transaction repeats and which period a
//! budget covers.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::common::DateWindow;
use crate::errors::EngineError;

/// Repeat cadence of a recurring transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Date `steps` repetitions after `anchor`. Monthly steps keep the
    /// anchor's day, clamped to the end of shorter months.
    pub fn advance(self, anchor: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => anchor.checked_add_days(Days::new(u64::from(steps))),
            Frequency::Weekly => anchor.checked_add_days(Days::new(u64::from(steps) * 7)),
            Frequency::Monthly => anchor.checked_add_months(Months::new(steps)),
        }
    }

    /// First repetition after `anchor` that falls on or after `reference`.
    pub fn next_on_or_after(self, anchor: NaiveDate, reference: NaiveDate) -> Option<NaiveDate> {
        let mut steps = self.steps_before(anchor, reference).max(1);
        loop {
            let date = self.advance(anchor, steps)?;
            if date >= reference {
                return Some(date);
            }
            steps = steps.checked_add(1)?;
        }
    }

    // Lower bound on the steps needed to reach `reference`; never overshoots.
    fn steps_before(self, anchor: NaiveDate, reference: NaiveDate) -> u32 {
        if reference <= anchor {
            return 0;
        }
        let days = (reference - anchor).num_days();
        let steps = match self {
            Frequency::Daily => days,
            Frequency::Weekly => days / 7,
            Frequency::Monthly => {
                let months = |date: NaiveDate| i64::from(date.year()) * 12 + i64::from(date.month0());
                months(reference) - months(anchor) - 1
            }
        };
        u32::try_from(steps.max(0)).unwrap_or(u32::MAX)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        };
        f.write_str(label)
    }
}

impl FromStr for Frequency {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(EngineError::InvalidInput(format!(
                "frequency must be `daily`, `weekly` or `monthly`, got `{other}`"
            ))),
        }
    }
}

/// Calendar period a budget limit applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BudgetPeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl BudgetPeriod {
    /// The period containing `date`: ISO week from Monday, calendar month,
    /// or calendar year.
    pub fn window_containing(self, date: NaiveDate) -> Result<DateWindow, EngineError> {
        let bounds = match self {
            BudgetPeriod::Weekly => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                date.checked_sub_days(Days::new(offset))
                    .and_then(|start| Some((start, start.checked_add_days(Days::new(7))?)))
            }
            BudgetPeriod::Monthly => NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .and_then(|start| Some((start, start.checked_add_months(Months::new(1))?))),
            BudgetPeriod::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1)
                .and_then(|start| Some((start, start.checked_add_months(Months::new(12))?))),
        };
        let (start, end) = bounds.ok_or_else(|| {
            EngineError::InvalidInput(format!("no {self} period contains {date}"))
        })?;
        DateWindow::new(start, end)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BudgetPeriod::Weekly => "weekly",
            BudgetPeriod::Monthly => "monthly",
            BudgetPeriod::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

impl FromStr for BudgetPeriod {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(BudgetPeriod::Weekly),
            "monthly" => Ok(BudgetPeriod::Monthly),
            "yearly" => Ok(BudgetPeriod::Yearly),
            other => Err(EngineError::InvalidInput(format!(
                "period must be `monthly`, `weekly` or `yearly`, got `{other}`"
            ))),
        }
    }
}
