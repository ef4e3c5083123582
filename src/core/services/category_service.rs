//! Registered categories, each typed as income or expense.

use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::core::state::DomainState;
use crate::domain::common::{find_by_name, position_by_id};
use crate::domain::transaction::MAX_DESCRIPTION_LEN;
use crate::domain::{Category, Displayable, TransactionKind};
use crate::errors::EngineError;

pub struct CategoryService;

impl CategoryService {
    pub fn add(
        state: &mut DomainState,
        name: &str,
        kind: TransactionKind,
        description: Option<&str>,
    ) -> ServiceResult<Category> {
        let name = Self::validate_name(state, name)?;
        let description = normalize_description(description)?;
        if let Some(conflict) = state
            .transactions
            .iter()
            .find(|txn| txn.kind != kind && txn.category.eq_ignore_ascii_case(&name))
        {
            return Err(EngineError::InvalidInput(format!(
                "`{name}` already holds {} entries",
                conflict.kind.to_string().to_lowercase()
            )));
        }

        let category = Category::new(name, kind, description);
        tracing::debug!(category = %category.display_label(), "category added");
        state.categories.push(category.clone());
        Ok(category)
    }

    /// Like [`CategoryService::add`], with the type given as `income` or `expense`.
    pub fn add_typed(
        state: &mut DomainState,
        name: &str,
        type_label: &str,
        description: Option<&str>,
    ) -> ServiceResult<Category> {
        let kind: TransactionKind = type_label.parse()?;
        Self::add(state, name, kind, description)
    }

    /// Fails while any transaction still uses the category.
    pub fn remove(state: &mut DomainState, id: Uuid) -> ServiceResult<Category> {
        let index = position_by_id(&state.categories, id)
            .ok_or_else(|| EngineError::InvalidInput(format!("category {id} not found")))?;
        let name = &state.categories[index].name;
        if state
            .transactions
            .iter()
            .any(|txn| txn.category.eq_ignore_ascii_case(name))
        {
            return Err(EngineError::InvalidInput(format!(
                "category `{name}` has linked transactions"
            )));
        }
        Ok(state.categories.remove(index))
    }

    pub fn list(state: &DomainState, kind: Option<TransactionKind>) -> Vec<&Category> {
        state
            .categories
            .iter()
            .filter(|category| kind.map_or(true, |kind| category.kind == kind))
            .collect()
    }

    pub fn find<'a>(state: &'a DomainState, name: &str) -> Option<&'a Category> {
        find_by_name(&state.categories, name)
    }

    pub fn get(state: &DomainState, id: Uuid) -> Option<&Category> {
        position_by_id(&state.categories, id).map(|index| &state.categories[index])
    }

    fn validate_name(state: &DomainState, candidate: &str) -> ServiceResult<String> {
        let name = candidate.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput(
                "category name must not be empty".into(),
            ));
        }
        if find_by_name(&state.categories, name).is_some() {
            return Err(EngineError::InvalidInput(format!(
                "category `{name}` already exists"
            )));
        }
        Ok(name.to_string())
    }
}

fn normalize_description(description: Option<&str>) -> ServiceResult<Option<String>> {
    let Some(text) = description.map(str::trim).filter(|text| !text.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(EngineError::InvalidInput(format!(
            "description is longer than {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    Ok(Some(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::core::clock::FixedClock;
    use crate::core::services::LedgerService;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn state() -> DomainState {
        let today = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        DomainState::new(
            EngineConfig::default().without_bonuses(),
            Arc::new(FixedClock::on(today)),
        )
        .expect("state")
    }

    #[test]
    fn rejects_unknown_type_and_duplicate_names() {
        let mut state = state();
        assert!(matches!(
            CategoryService::add_typed(&mut state, "Gifts", "transfer", None),
            Err(EngineError::InvalidInput(_))
        ));
        let food = CategoryService::add_typed(&mut state, " Food ", "Expense", Some("Groceries"))
            .expect("expense category");
        assert_eq!(food.name, "Food");
        assert_eq!(food.display_label(), "Food (Expense) - Groceries");
        assert!(CategoryService::add(&mut state, "FOOD", TransactionKind::Expense, None).is_err());
        assert!(CategoryService::add(&mut state, "  ", TransactionKind::Income, None).is_err());
        assert_eq!(state.categories().len(), 1);
    }

    #[test]
    fn type_must_agree_with_existing_entries() {
        let mut state = state();
        LedgerService::record_income(&mut state, dec!(100), "Bonus").unwrap();
        assert!(matches!(
            CategoryService::add(&mut state, "bonus", TransactionKind::Expense, None),
            Err(EngineError::InvalidInput(_))
        ));
        CategoryService::add(&mut state, "bonus", TransactionKind::Income, None).unwrap();
    }

    #[test]
    fn linked_category_cannot_be_removed() {
        let mut state = state();
        let rent = CategoryService::add(&mut state, "Rent", TransactionKind::Expense, None).unwrap();
        let gifts = CategoryService::add(&mut state, "Gifts", TransactionKind::Income, None).unwrap();
        LedgerService::record_expense(&mut state, dec!(500), "rent").unwrap();

        assert!(CategoryService::remove(&mut state, rent.id).is_err());
        assert_eq!(CategoryService::remove(&mut state, gifts.id).unwrap().name, "Gifts");
        assert!(CategoryService::get(&state, gifts.id).is_none());
        assert_eq!(CategoryService::find(&state, "RENT").map(|c| c.id), Some(rent.id));
        assert_eq!(CategoryService::list(&state, Some(TransactionKind::Income)).len(), 0);
    }
}
