//! Savings goals and their progress views.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A named savings target with a deadline and a food reward paid once on
/// completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub deadline: NaiveDate,
    pub reward_amount: u32,
    pub reward_claimed: bool,
}

impl Goal {
    pub fn new(
        name: impl Into<String>,
        target_amount: Decimal,
        current_amount: Decimal,
        deadline: NaiveDate,
        reward_amount: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            target_amount,
            current_amount,
            deadline,
            reward_amount,
            reward_claimed: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Amount still needed to reach the target.
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Fraction funded, in `[0, 1]`.
    pub fn ratio(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        (self.current_amount / self.target_amount).min(Decimal::ONE)
    }

    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    pub fn progress(&self, today: NaiveDate) -> GoalProgress {
        let ratio = self.ratio();
        let percent = (ratio * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        GoalProgress {
            id: self.id,
            name: self.name.clone(),
            current: self.current_amount,
            target: self.target_amount,
            ratio,
            percent,
            tier: ProgressTier::from_ratio(ratio),
            days_left: self.days_left(today),
            completed: self.is_completed(),
            reward_claimed: self.reward_claimed,
        }
    }
}

impl Identifiable for Goal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Goal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Goal {
    fn amount(&self) -> Decimal {
        self.current_amount
    }
}

impl Displayable for Goal {
    fn display_label(&self) -> String {
        format!(
            "{} ({:.0} / {:.0})",
            self.name, self.current_amount, self.target_amount
        )
    }
}

/// Display band for a goal's funding ratio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProgressTier {
    Starting,
    Building,
    Halfway,
    Almost,
    Done,
}

impl ProgressTier {
    pub fn from_ratio(ratio: Decimal) -> Self {
        let quarter = Decimal::new(25, 2);
        let half = Decimal::new(50, 2);
        let three_quarters = Decimal::new(75, 2);
        if ratio >= Decimal::ONE {
            ProgressTier::Done
        } else if ratio >= three_quarters {
            ProgressTier::Almost
        } else if ratio >= half {
            ProgressTier::Halfway
        } else if ratio >= quarter {
            ProgressTier::Building
        } else {
            ProgressTier::Starting
        }
    }
}

impl fmt::Display for ProgressTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProgressTier::Starting => "Starting",
            ProgressTier::Building => "Building",
            ProgressTier::Halfway => "Halfway",
            ProgressTier::Almost => "Almost there",
            ProgressTier::Done => "Done",
        };
        f.write_str(label)
    }
}

/// Read-only progress view of a goal, computed on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalProgress {
    pub id: Uuid,
    pub name: String,
    pub current: Decimal,
    pub target: Decimal,
    pub ratio: Decimal,
    pub percent: Decimal,
    pub tier: ProgressTier,
    /// Negative once the deadline has passed.
    pub days_left: i64,
    pub completed: bool,
    pub reward_claimed: bool,
}
