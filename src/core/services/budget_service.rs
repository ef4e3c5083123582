//! Per-category spending limits checked against recorded expenses.

use rust_decimal::Decimal;

use crate::core::services::{LedgerService, ServiceResult};
use crate::core::state::DomainState;
use crate::domain::common::{ensure_positive, find_by_name, sum_amounts, DateWindow};
use crate::domain::{BudgetPeriod, BudgetStatus, CategoryBudget, TransactionKind};
use crate::errors::EngineError;

pub struct BudgetService;

impl BudgetService {
    /// Sets or replaces the limit for `category` over a fixed window.
    pub fn set_limit(
        state: &mut DomainState,
        category: &str,
        limit: Decimal,
        window: DateWindow,
    ) -> ServiceResult<CategoryBudget> {
        let category = Self::budget_category(state, category)?;
        ensure_positive(limit)?;
        Self::store(state, CategoryBudget::new(category, limit, window))
    }

    /// Sets or replaces a limit that resets every `period`.
    pub fn set_periodic_limit(
        state: &mut DomainState,
        category: &str,
        limit: Decimal,
        period: BudgetPeriod,
    ) -> ServiceResult<CategoryBudget> {
        let category = Self::budget_category(state, category)?;
        ensure_positive(limit)?;
        Self::store(state, CategoryBudget::periodic(category, limit, period))
    }

    // Budgets only apply to expense categories.
    fn budget_category(state: &DomainState, category: &str) -> ServiceResult<String> {
        let category = category.trim();
        if category.is_empty() {
            return Err(EngineError::InvalidInput(
                "budget category must not be empty".into(),
            ));
        }
        match find_by_name(&state.categories, category) {
            Some(registered) if registered.kind == TransactionKind::Income => {
                Err(EngineError::InvalidInput(format!(
                    "`{}` is an income category and cannot carry a budget",
                    registered.name
                )))
            }
            Some(registered) => Ok(registered.name.clone()),
            None => Ok(category.to_string()),
        }
    }

    fn store(state: &mut DomainState, budget: CategoryBudget) -> ServiceResult<CategoryBudget> {
        match state
            .budgets
            .iter_mut()
            .find(|existing| existing.category == budget.category)
        {
            Some(existing) => *existing = budget.clone(),
            None => state.budgets.push(budget.clone()),
        }
        tracing::debug!(
            category = %budget.category,
            limit = %budget.limit,
            scope = ?budget.scope,
            "budget limit set"
        );
        Ok(budget)
    }

    pub fn remove(state: &mut DomainState, category: &str) -> ServiceResult<CategoryBudget> {
        let index = state
            .budgets
            .iter()
            .position(|budget| budget.category == category)
            .ok_or_else(|| EngineError::InvalidInput(format!("no budget for `{category}`")))?;
        Ok(state.budgets.remove(index))
    }

    pub fn status(state: &DomainState, category: &str) -> ServiceResult<BudgetStatus> {
        let budget = state
            .budgets
            .iter()
            .find(|budget| budget.category == category)
            .ok_or_else(|| EngineError::InvalidInput(format!("no budget for `{category}`")))?;
        Self::evaluate(state, budget)
    }

    /// Status of every budget whose current window can be built.
    pub fn statuses(state: &DomainState) -> Vec<BudgetStatus> {
        state
            .budgets
            .iter()
            .filter_map(|budget| {
                Self::evaluate(state, budget)
                    .inspect_err(|err| {
                        tracing::warn!(category = %budget.category, %err, "budget skipped");
                    })
                    .ok()
            })
            .collect()
    }

    fn evaluate(state: &DomainState, budget: &CategoryBudget) -> ServiceResult<BudgetStatus> {
        let window = budget.scope.window_on(state.clock.today())?;
        let spent = sum_amounts(
            LedgerService::transactions_in(state, window).filter(|txn| {
                txn.kind == TransactionKind::Expense && txn.category == budget.category
            }),
        );
        Ok(BudgetStatus::from_parts(budget, window, spent))
    }
}
