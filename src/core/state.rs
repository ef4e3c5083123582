//! The single owned container for all session state.

use std::fmt;
use std::sync::Arc;

use chrono::Months;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::EngineConfig;
use crate::core::bonus::BonusSource;
use crate::core::clock::{Clock, SystemClock};
use crate::core::services::GoalService;
use crate::domain::common::position_by_id;
use crate::domain::{Category, CategoryBudget, Goal, PetState, Transaction};
use crate::errors::{ConfigError, EngineError};

/// All mutable session state. Services take `&mut DomainState`; nothing
/// else holds owning references to it.
pub struct DomainState {
    pub(crate) config: EngineConfig,
    pub(crate) balance: Decimal,
    pub(crate) display_name: String,
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) categories: Vec<Category>,
    pub(crate) goals: Vec<Goal>,
    pub(crate) budgets: Vec<CategoryBudget>,
    pub(crate) pet: PetState,
    pub(crate) food: u32,
    pub(crate) bonus: BonusSource,
    pub(crate) clock: Arc<dyn Clock>,
}

impl DomainState {
    /// Builds a session from `config`, validating it first.
    pub fn new(config: EngineConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        config.validate()?;
        let pet = PetState::new(
            config.pet.name.clone(),
            config.pet.starting_energy,
            config.pet.history_limit,
        );
        let mut state = Self {
            balance: config.ledger.starting_balance,
            display_name: config.ledger.display_name.clone(),
            transactions: Vec::new(),
            categories: Vec::new(),
            goals: Vec::new(),
            budgets: Vec::new(),
            pet,
            food: config.shop.starting_food,
            bonus: BonusSource::from_seed_option(config.rng_seed),
            clock,
            config,
        };
        if state.config.goals.seed_demo_goals {
            state
                .seed_demo_goals()
                .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        }
        tracing::debug!(
            balance = %state.balance,
            energy = state.pet.energy(),
            goals = state.goals.len(),
            "domain state initialized"
        );
        Ok(state)
    }

    /// Default configuration on the system clock.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::new(EngineConfig::default(), Arc::new(SystemClock))
    }

    fn seed_demo_goals(&mut self) -> Result<(), EngineError> {
        let today = self.clock.today();
        let in_months = |months: u32| today.checked_add_months(Months::new(months)).unwrap_or(today);
        GoalService::add_goal(self, "New laptop", dec!(50000), dec!(25000), in_months(3))?;
        GoalService::add_goal(
            self,
            "Seaside vacation",
            dec!(100000),
            dec!(30000),
            in_months(6),
        )?;
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn food(&self) -> u32 {
        self.food
    }

    pub fn pet(&self) -> &PetState {
        &self.pet
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn budgets(&self) -> &[CategoryBudget] {
        &self.budgets
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(crate) fn goal_index(&self, id: uuid::Uuid) -> Result<usize, EngineError> {
        position_by_id(&self.goals, id).ok_or(EngineError::GoalNotFound(id))
    }

    pub(crate) fn ensure_funds(&self, amount: Decimal) -> Result<(), EngineError> {
        if amount > self.balance {
            return Err(EngineError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        Ok(())
    }

    pub(crate) fn credit_food(&mut self, amount: u32) {
        self.food = self.food.saturating_add(amount);
    }
}

impl fmt::Debug for DomainState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainState")
            .field("balance", &self.balance)
            .field("display_name", &self.display_name)
            .field("transactions", &self.transactions.len())
            .field("categories", &self.categories.len())
            .field("goals", &self.goals.len())
            .field("budgets", &self.budgets.len())
            .field("pet", &self.pet.view())
            .field("food", &self.food)
            .finish()
    }
}
