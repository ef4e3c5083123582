//! Balance changes from income and expense entries, and aggregations over them.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::core::state::DomainState;
use crate::domain::common::{ensure_positive, find_by_name, sum_amounts, DateWindow};
use crate::domain::{
    CategoryTotal, Displayable, EntryDetails, Frequency, LedgerTotals, PetActionKind, PetEvent,
    Transaction, TransactionKind,
};
use crate::errors::EngineError;

const FALLBACK_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseOutcome {
    pub transaction_id: Uuid,
    pub balance: Decimal,
    pub energy: u8,
    pub warning: Option<PetEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeOutcome {
    pub transaction_id: Uuid,
    pub balance: Decimal,
    pub food: u32,
    pub food_earned: u32,
    pub energy: u8,
}

/// A repeating entry and the next date it falls due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringEntry {
    pub transaction_id: Uuid,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub category: String,
    pub frequency: Frequency,
    pub next_due: NaiveDate,
}

pub struct LedgerService;

impl LedgerService {
    /// Debits the balance and costs the pet some energy.
    pub fn record_expense(
        state: &mut DomainState,
        amount: Decimal,
        category: &str,
    ) -> ServiceResult<ExpenseOutcome> {
        Self::record_expense_with(state, amount, category, EntryDetails::default())
    }

    pub fn record_expense_with(
        state: &mut DomainState,
        amount: Decimal,
        category: &str,
        details: EntryDetails,
    ) -> ServiceResult<ExpenseOutcome> {
        ensure_positive(amount)?;
        state.ensure_funds(amount).inspect_err(|err| {
            tracing::debug!(%amount, category, %err, "expense rejected");
        })?;
        let category = resolve_category(state, category, TransactionKind::Expense)?;
        let details = details.normalized()?;

        let txn = Transaction::new(state.clock.today(), amount, TransactionKind::Expense, category)
            .with_details(details);
        let transaction_id = txn.id;
        let label = txn.display_label();
        state.balance -= amount;
        state.transactions.push(txn);

        let penalty = i32::from(state.config.ledger.expense_energy_penalty);
        let now = state.clock.now();
        let change = state
            .pet
            .adjust_energy(-penalty, PetActionKind::Expense, now);

        tracing::debug!(
            entry = %label,
            balance = %state.balance,
            energy = change.after,
            "expense recorded"
        );
        Ok(ExpenseOutcome {
            transaction_id,
            balance: state.balance,
            energy: change.after,
            warning: change.warning,
        })
    }

    /// Credits the balance, pays food per the income policy, and cheers the pet up.
    pub fn record_income(
        state: &mut DomainState,
        amount: Decimal,
        category: &str,
    ) -> ServiceResult<IncomeOutcome> {
        Self::record_income_with(state, amount, category, EntryDetails::default())
    }

    /// Fails with `InvalidAmount` when the new balance is not representable.
    pub fn record_income_with(
        state: &mut DomainState,
        amount: Decimal,
        category: &str,
        details: EntryDetails,
    ) -> ServiceResult<IncomeOutcome> {
        ensure_positive(amount)?;
        let balance = state.balance.checked_add(amount).ok_or_else(|| {
            EngineError::InvalidAmount(format!(
                "{amount} would push the balance past the largest representable amount"
            ))
        })?;
        let category = resolve_category(state, category, TransactionKind::Income)?;
        let details = details.normalized()?;

        let txn = Transaction::new(state.clock.today(), amount, TransactionKind::Income, category)
            .with_details(details);
        let transaction_id = txn.id;
        let label = txn.display_label();
        state.balance = balance;
        state.transactions.push(txn);

        let food_earned = state.config.ledger.income_reward.reward_for(amount);
        state.credit_food(food_earned);

        let bonus = i32::from(state.config.ledger.income_energy_bonus);
        let now = state.clock.now();
        let change = state.pet.adjust_energy(bonus, PetActionKind::Income, now);

        tracing::debug!(
            entry = %label,
            balance = %state.balance,
            food_earned,
            energy = change.after,
            "income recorded"
        );
        Ok(IncomeOutcome {
            transaction_id,
            balance: state.balance,
            food: state.food,
            food_earned,
            energy: change.after,
        })
    }

    /// Totals of transactions dated inside `window`.
    pub fn summary(state: &DomainState, window: DateWindow) -> LedgerTotals {
        let mut totals = LedgerTotals::default();
        for txn in Self::transactions_in(state, window) {
            totals.record(txn);
        }
        totals
    }

    /// Totals over the whole ledger.
    pub fn totals(state: &DomainState) -> LedgerTotals {
        Self::summary(state, DateWindow::unbounded())
    }

    /// Per-category totals for `kind`, largest first, ties by name.
    pub fn by_category(state: &DomainState, kind: TransactionKind) -> Vec<CategoryTotal> {
        let mut grouped: HashMap<&str, Vec<&Transaction>> = HashMap::new();
        for txn in state.transactions.iter().filter(|txn| txn.kind == kind) {
            grouped.entry(txn.category.as_str()).or_default().push(txn);
        }
        let mut totals: Vec<CategoryTotal> = grouped
            .into_iter()
            .map(|(category, entries)| CategoryTotal {
                category: category.to_string(),
                total: sum_amounts(entries.iter().copied()),
                count: entries.len(),
            })
            .collect();
        totals.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });
        totals
    }

    pub fn transactions_in(
        state: &DomainState,
        window: DateWindow,
    ) -> impl Iterator<Item = &Transaction> {
        state
            .transactions
            .iter()
            .filter(move |txn| window.contains(txn.date))
    }

    /// Repeating entries with their next due date on or after today,
    /// soonest first.
    pub fn recurring(state: &DomainState) -> Vec<RecurringEntry> {
        let today = state.clock.today();
        let mut entries: Vec<RecurringEntry> = state
            .transactions
            .iter()
            .filter_map(|txn| {
                let frequency = txn.recurrence?;
                Some(RecurringEntry {
                    transaction_id: txn.id,
                    kind: txn.kind,
                    amount: txn.amount,
                    category: txn.category.clone(),
                    frequency,
                    next_due: frequency.next_on_or_after(txn.date, today)?,
                })
            })
            .collect();
        entries.sort_by(|a, b| {
            a.next_due
                .cmp(&b.next_due)
                .then_with(|| a.category.cmp(&b.category))
        });
        entries
    }
}

// Blank names fall back to `Other`. A registered category supplies its
// canonical spelling and must match the entry's kind.
fn resolve_category(
    state: &DomainState,
    category: &str,
    kind: TransactionKind,
) -> ServiceResult<String> {
    let trimmed = category.trim();
    if trimmed.is_empty() {
        return Ok(FALLBACK_CATEGORY.to_string());
    }
    match find_by_name(&state.categories, trimmed) {
        Some(registered) if registered.kind != kind => Err(EngineError::InvalidInput(format!(
            "`{}` is an {} category and cannot hold an {} entry",
            registered.name,
            registered.kind.to_string().to_lowercase(),
            kind.to_string().to_lowercase()
        ))),
        Some(registered) => Ok(registered.name.clone()),
        None => Ok(trimmed.to_string()),
    }
}
