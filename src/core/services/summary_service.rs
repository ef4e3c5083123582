use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::services::{BudgetService, GoalService, LedgerService};
use crate::core::state::DomainState;
use crate::domain::common::DateWindow;
use crate::domain::{BudgetStatus, GoalProgress, LedgerTotals, PetView};

/// Everything the main screen shows, in one read.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Overview {
    pub display_name: String,
    pub balance: Decimal,
    pub food: u32,
    pub totals: LedgerTotals,
    pub pet: PetView,
    pub goals: Vec<GoalProgress>,
    pub budgets: Vec<BudgetStatus>,
}

pub struct SummaryService;

impl SummaryService {
    /// Ledger totals for `window` plus current balances, pet, open goals and budgets.
    pub fn overview(state: &DomainState, window: DateWindow) -> Overview {
        let today = state.clock.today();
        Overview {
            display_name: state.display_name.clone(),
            balance: state.balance,
            food: state.food,
            totals: LedgerService::summary(state, window),
            pet: state.pet.view(),
            goals: GoalService::active(state)
                .into_iter()
                .map(|goal| goal.progress(today))
                .collect(),
            budgets: BudgetService::statuses(state),
        }
    }
}
