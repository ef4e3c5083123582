mod common;

use std::time::Duration;

use cashpet_core::config::BonusRoll;
use cashpet_core::core::services::{GoalService, LedgerService, PetService, ShopService};
use cashpet_core::domain::pet::MAX_ENERGY;
use proptest::prelude::*;
use rust_decimal::Decimal;

use common::{date, quiet_config, state_on};

#[derive(Debug, Clone)]
enum Op {
    Income(u32),
    Windfall,
    Expense(u32),
    Fund(u32),
    Claim,
    Buy(usize),
    Feed,
    Tick(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u32..50_000).prop_map(Op::Income),
        Just(Op::Windfall),
        (1u32..50_000).prop_map(Op::Expense),
        (1u32..30_000).prop_map(Op::Fund),
        Just(Op::Claim),
        (0usize..3).prop_map(Op::Buy),
        Just(Op::Feed),
        (0u64..400).prop_map(Op::Tick),
    ]
}

proptest! {
    #[test]
    fn invariants_hold_under_any_sequence(ops in prop::collection::vec(op(), 1..60), seed in any::<u64>()) {
        let mut config = quiet_config();
        config.goals.seed_demo_goals = true;
        config.rng_seed = Some(seed);
        config.pet.feed_bonus = BonusRoll::new(0.5, 1, 5);
        config.shop.purchase_bonus = BonusRoll::new(0.5, 1, 10);
        let (mut state, _) = state_on(config, date(2024, 1, 15));
        let goal_id = state.goals()[0].id;
        let products = ["snack", "meal", "feast"];
        let mut claims = 0;

        for op in ops {
            let balance_before = state.balance();
            let food_before = state.food();
            let energy_before = state.pet().energy();
            let entries_before = state.transactions().len();
            let goal_before = state.goals()[0].clone();
            let result = match op {
                Op::Income(amount) => LedgerService::record_income(&mut state, Decimal::from(amount), "Job").map(|_| ()),
                Op::Windfall => LedgerService::record_income(&mut state, Decimal::MAX - Decimal::from(20_000), "Lottery").map(|_| ()),
                Op::Expense(amount) => LedgerService::record_expense(&mut state, Decimal::from(amount), "Stuff").map(|_| ()),
                Op::Fund(amount) => GoalService::fund_goal(&mut state, goal_id, Decimal::from(amount)).map(|_| ()),
                Op::Claim => GoalService::claim_reward(&mut state, goal_id).map(|_| claims += 1),
                Op::Buy(index) => ShopService::purchase(&mut state, products[index]).map(|_| ()),
                Op::Feed => PetService::feed(&mut state).map(|_| ()),
                Op::Tick(secs) => {
                    PetService::tick(&mut state, Duration::from_secs(secs));
                    Ok(())
                }
            };
            if result.is_err() {
                prop_assert_eq!(state.balance(), balance_before);
                prop_assert_eq!(state.food(), food_before);
                prop_assert_eq!(state.pet().energy(), energy_before);
                prop_assert_eq!(state.transactions().len(), entries_before);
                let goal = &state.goals()[0];
                prop_assert_eq!(goal.current_amount, goal_before.current_amount);
                prop_assert_eq!(goal.reward_claimed, goal_before.reward_claimed);
            }

            prop_assert!(state.balance() >= Decimal::ZERO);
            prop_assert!(state.pet().energy() <= MAX_ENERGY);
            let goal = &state.goals()[0];
            prop_assert!(goal.current_amount <= goal.target_amount);
            prop_assert!(goal.current_amount >= Decimal::ZERO);
        }
        prop_assert!(claims <= 1);
    }
}
