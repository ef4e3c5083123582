//! Savings goals: creation, funding from the balance, and reward claims.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::core::state::DomainState;
use crate::domain::common::ensure_positive;
use crate::domain::{Displayable, Goal, GoalProgress};
use crate::errors::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundOutcome {
    /// Portion of the requested amount actually moved into the goal.
    pub applied: Decimal,
    pub balance: Decimal,
    pub current_amount: Decimal,
    pub completed: bool,
    pub bonus_food: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub reward: u32,
    pub food: u32,
}

pub struct GoalService;

impl GoalService {
    pub fn add_goal(
        state: &mut DomainState,
        name: &str,
        target: Decimal,
        current: Decimal,
        deadline: NaiveDate,
    ) -> ServiceResult<Goal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::InvalidInput("goal name must not be empty".into()));
        }
        if target <= Decimal::ZERO {
            return Err(EngineError::InvalidInput(
                "target amount must be greater than zero".into(),
            ));
        }
        if current < Decimal::ZERO {
            return Err(EngineError::InvalidInput(
                "current amount must not be negative".into(),
            ));
        }
        if current > target {
            return Err(EngineError::InvalidInput(
                "current amount must not exceed the target".into(),
            ));
        }

        let reward = state.config.goals.reward.reward_for(target);
        let goal = Goal::new(name, target, current, deadline, reward);
        state.goals.push(goal.clone());
        tracing::debug!(goal = %goal.name, %target, %current, reward, "goal added");
        Ok(goal)
    }

    /// Moves money from the balance into a goal. Only the amount still
    /// missing is taken, so a goal never ends above its target.
    pub fn fund_goal(
        state: &mut DomainState,
        goal_id: Uuid,
        amount: Decimal,
    ) -> ServiceResult<FundOutcome> {
        ensure_positive(amount)?;
        state.ensure_funds(amount)?;
        let index = state.goal_index(goal_id)?;
        if state.goals[index].is_completed() {
            return Err(EngineError::GoalAlreadyCompleted(
                state.goals[index].name.clone(),
            ));
        }

        let funding_bonus = state.config.goals.funding_bonus;
        let bonus_food = state.bonus.roll(&funding_bonus);

        let goal = &mut state.goals[index];
        let applied = amount.min(goal.remaining());
        goal.current_amount += applied;
        let completed = goal.is_completed();
        let current_amount = goal.current_amount;
        if completed {
            tracing::info!(goal = %goal.display_label(), "goal completed");
        }

        state.balance -= applied;
        if let Some(bonus) = bonus_food {
            state.credit_food(bonus);
        }

        tracing::debug!(
            %applied,
            requested = %amount,
            balance = %state.balance,
            ?bonus_food,
            "goal funded"
        );
        Ok(FundOutcome {
            applied,
            balance: state.balance,
            current_amount,
            completed,
            bonus_food,
        })
    }

    pub fn claim_reward(state: &mut DomainState, goal_id: Uuid) -> ServiceResult<ClaimOutcome> {
        let index = state.goal_index(goal_id)?;
        let goal = &mut state.goals[index];
        if !goal.is_completed() {
            return Err(EngineError::NotCompleted(goal.name.clone()));
        }
        if goal.reward_claimed {
            return Err(EngineError::AlreadyClaimed(goal.name.clone()));
        }
        goal.reward_claimed = true;
        let reward = goal.reward_amount;
        tracing::info!(goal = %goal.name, reward, "goal reward claimed");

        state.credit_food(reward);
        Ok(ClaimOutcome {
            reward,
            food: state.food,
        })
    }

    pub fn get(state: &DomainState, goal_id: Uuid) -> ServiceResult<&Goal> {
        let index = state.goal_index(goal_id)?;
        Ok(&state.goals[index])
    }

    pub fn list(state: &DomainState) -> &[Goal] {
        &state.goals
    }

    /// Goals that still accept funding.
    pub fn active(state: &DomainState) -> Vec<&Goal> {
        state
            .goals
            .iter()
            .filter(|goal| !goal.is_completed())
            .collect()
    }

    pub fn progress(state: &DomainState, goal_id: Uuid) -> ServiceResult<GoalProgress> {
        let today = state.clock.today();
        Self::get(state, goal_id).map(|goal| goal.progress(today))
    }
}
