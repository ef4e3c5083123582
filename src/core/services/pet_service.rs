//! Feeding and time-based decay of the pet.

use std::time::Duration;

use crate::core::services::ServiceResult;
use crate::core::state::DomainState;
use crate::domain::{Displayable, PetActionKind, PetEvent, PetView};
use crate::errors::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedOutcome {
    pub energy: u8,
    pub food: u32,
    pub bonus_food: Option<u32>,
    /// Set when the pet was asleep before this meal.
    pub event: Option<PetEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whole decay intervals applied by this call.
    pub steps: u32,
    pub energy: u8,
    pub events: Vec<PetEvent>,
}

pub struct PetService;

impl PetService {
    pub fn feed(state: &mut DomainState) -> ServiceResult<FeedOutcome> {
        let cost = state.config.pet.feed_cost;
        if state.food < cost {
            tracing::debug!(cost, food = state.food, "feed rejected");
            return Err(EngineError::InsufficientFoodCurrency {
                required: cost,
                available: state.food,
            });
        }

        state.food -= cost;
        let gain = i32::from(state.config.pet.feed_energy);
        let now = state.clock.now();
        let change = state.pet.adjust_energy(gain, PetActionKind::Feed, now);
        state.pet.seconds_without_food = 0;

        let feed_bonus = state.config.pet.feed_bonus;
        let bonus_food = state.bonus.roll(&feed_bonus);
        if let Some(bonus) = bonus_food {
            state.credit_food(bonus);
        }

        let event = (change.before == 0 && change.after > 0).then_some(PetEvent::WokeUp);
        if event.is_some() {
            tracing::info!(pet = %state.pet.name, "pet woke up");
        }
        tracing::debug!(
            pet = %state.pet.view().display_label(),
            food = state.food,
            ?bonus_food,
            "pet fed"
        );
        Ok(FeedOutcome {
            energy: change.after,
            food: state.food,
            bonus_food,
            event,
        })
    }

    /// Advances pet time by `elapsed`. One decay step is applied per whole
    /// configured interval; any remainder carries into the next call.
    pub fn tick(state: &mut DomainState, elapsed: Duration) -> TickOutcome {
        let interval = state.config.pet.tick_interval_secs;
        let pending = state.pet.pending_secs.saturating_add(elapsed.as_secs());
        let steps = pending / interval;
        state.pet.pending_secs = pending % interval;

        let mut outcome = TickOutcome {
            steps: u32::try_from(steps).unwrap_or(u32::MAX),
            energy: state.pet.energy(),
            events: Vec::new(),
        };
        for _ in 0..outcome.steps {
            if let Some(event) = Self::decay_step(state, interval) {
                outcome.events.push(event);
            }
        }
        outcome.energy = state.pet.energy();
        outcome
    }

    fn decay_step(state: &mut DomainState, interval: u64) -> Option<PetEvent> {
        let settings = &state.config.pet;
        let interval = u32::try_from(interval).unwrap_or(u32::MAX);
        state.pet.seconds_without_food = state.pet.seconds_without_food.saturating_add(interval);

        let mut delta = -i32::from(settings.decay_per_tick);
        if state.pet.seconds_without_food >= settings.starvation_threshold_secs {
            delta -= i32::from(settings.starvation_penalty);
        }
        let now = state.clock.now();
        let change = state.pet.adjust_energy(delta, PetActionKind::Decay, now);
        if let Some(event) = change.warning {
            tracing::warn!(
                pet = %state.pet.view().display_label(),
                ?event,
                "pet needs attention"
            );
        }
        change.warning
    }

    pub fn view(state: &DomainState) -> PetView {
        state.pet.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BonusRoll, EngineConfig};
    use crate::core::clock::FixedClock;
    use crate::domain::Mood;
    use chrono::NaiveDate;
    use std::sync::Arc;

    const INTERVAL: Duration = Duration::from_secs(30);

    fn state_with(energy: u8, food: u32) -> DomainState {
        let mut config = EngineConfig::default().without_bonuses();
        config.pet.starting_energy = energy;
        config.shop.starting_food = food;
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        DomainState::new(config, Arc::new(FixedClock::on(today))).expect("state")
    }

    #[test]
    fn feed_requires_food() {
        let mut state = state_with(50, 9);
        let err = PetService::feed(&mut state).expect_err("not enough food");
        assert_eq!(
            err,
            EngineError::InsufficientFoodCurrency {
                required: 10,
                available: 9
            }
        );
        assert_eq!(state.pet().energy(), 50);
        assert_eq!(state.food(), 9);
    }

    #[test]
    fn feed_adds_energy_and_resets_hunger_clock() {
        let mut state = state_with(90, 25);
        PetService::tick(&mut state, INTERVAL * 2);
        assert_eq!(state.pet().seconds_without_food, 60);

        let outcome = PetService::feed(&mut state).expect("feed");
        assert_eq!(outcome.energy, 100);
        assert_eq!(outcome.food, 15);
        assert_eq!(outcome.event, None);
        assert_eq!(state.pet().seconds_without_food, 0);
    }

    #[test]
    fn feeding_a_sleeping_pet_wakes_it() {
        let mut state = state_with(0, 10);
        assert_eq!(state.pet().mood(), Mood::Asleep);
        let outcome = PetService::feed(&mut state).expect("feed");
        assert_eq!(outcome.event, Some(PetEvent::WokeUp));
        assert_eq!(outcome.energy, 20);
    }

    #[test]
    fn hungry_warning_fires_once() {
        let mut state = state_with(25, 0);
        let outcomes: Vec<TickOutcome> =
            (0..3).map(|_| PetService::tick(&mut state, INTERVAL)).collect();
        assert_eq!(state.pet().energy(), 10);
        assert_eq!(outcomes[0].events, vec![PetEvent::VeryHungry { energy: 20 }]);
        assert!(outcomes[1].events.is_empty());
        assert!(outcomes[2].events.is_empty());
    }

    #[test]
    fn starvation_adds_extra_decay() {
        let mut state = state_with(100, 0);
        let energies: Vec<u8> = (0..5)
            .map(|_| PetService::tick(&mut state, INTERVAL).energy)
            .collect();
        // 30s, 60s, 90s: -5 each; from 120s on: -15.
        assert_eq!(energies, vec![95, 90, 85, 70, 55]);
    }

    #[test]
    fn partial_intervals_carry_over() {
        let mut state = state_with(60, 0);
        assert_eq!(PetService::tick(&mut state, Duration::from_secs(20)).steps, 0);
        assert_eq!(state.pet().energy(), 60);
        let outcome = PetService::tick(&mut state, Duration::from_secs(20));
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.energy, 55);
        assert_eq!(state.pet().pending_secs, 10);

        let bulk = PetService::tick(&mut state, Duration::from_secs(80));
        assert_eq!(bulk.steps, 3);
    }

    #[test]
    fn falling_asleep_is_reported() {
        let mut state = state_with(5, 0);
        let outcome = PetService::tick(&mut state, INTERVAL);
        assert_eq!(outcome.energy, 0);
        assert_eq!(outcome.events, vec![PetEvent::FellAsleep]);
        let again = PetService::tick(&mut state, INTERVAL);
        assert!(again.events.is_empty());
    }

    #[test]
    fn feed_bonus_is_credited() {
        let mut config = EngineConfig::default().without_bonuses();
        config.pet.feed_bonus = BonusRoll::new(1.0, 2, 2);
        config.shop.starting_food = 10;
        let mut state =
            DomainState::new(config, Arc::new(crate::core::clock::SystemClock)).expect("state");
        let outcome = PetService::feed(&mut state).expect("feed");
        assert_eq!(outcome.bonus_food, Some(2));
        assert_eq!(outcome.food, 2);
    }
}
