mod common;

use cashpet_core::core::services::LedgerService;
use cashpet_core::domain::common::DateWindow;
use cashpet_core::domain::{parse_amount, PetEvent, TransactionKind};
use cashpet_core::EngineError;
use chrono::Duration;
use rust_decimal_macros::dec;

use common::{date, quiet_config, quiet_state, state_on};

#[test]
fn overdraft_is_rejected_without_side_effects() {
    let mut state = quiet_state();
    let err = LedgerService::record_expense(&mut state, dec!(20000), "Food")
        .expect_err("expense larger than balance");
    assert_eq!(
        err,
        EngineError::InsufficientFunds {
            requested: dec!(20000),
            available: dec!(15000.50),
        }
    );
    assert_eq!(state.balance(), dec!(15000.50));
    assert_eq!(state.pet().energy(), 80);
    assert!(state.transactions().is_empty());
}

#[test]
fn salary_raises_balance_energy_and_food() {
    let mut state = quiet_state();
    let outcome = LedgerService::record_income(&mut state, dec!(1000), "Salary").expect("income");
    assert_eq!(outcome.balance, dec!(16000.50));
    assert_eq!(outcome.energy, 90);
    assert_eq!(outcome.food_earned, 10);
    assert_eq!(state.food(), 10);
    assert_eq!(state.transactions()[0].kind, TransactionKind::Income);
}

#[test]
fn expenses_drain_energy_and_can_trigger_warning() {
    let mut config = quiet_config();
    config.pet.starting_energy = 23;
    let (mut state, _) = state_on(config, date(2024, 1, 15));

    let outcome = LedgerService::record_expense(&mut state, dec!(12.30), "Coffee").expect("expense");
    assert_eq!(outcome.energy, 18);
    assert_eq!(outcome.warning, Some(PetEvent::VeryHungry { energy: 18 }));
    assert_eq!(outcome.balance, dec!(14988.20));

    let again = LedgerService::record_expense(&mut state, dec!(1), "Coffee").expect("expense");
    assert_eq!(again.energy, 13);
    assert_eq!(again.warning, None);
}

#[test]
fn parsed_user_input_feeds_the_ledger() {
    let mut state = quiet_state();
    let amount = parse_amount(" 49,90 ").expect("comma decimal");
    LedgerService::record_expense(&mut state, amount, "  ").expect("expense");
    assert_eq!(state.transactions()[0].category, "Other");
    assert!(matches!(
        parse_amount("abc"),
        Err(EngineError::InvalidAmount(_))
    ));
}

#[test]
fn summary_respects_date_window() {
    let (mut state, clock) = state_on(quiet_config(), date(2024, 1, 30));
    LedgerService::record_income(&mut state, dec!(3000), "Salary").unwrap();
    LedgerService::record_expense(&mut state, dec!(200), "Food").unwrap();

    clock.advance(Duration::days(5));
    LedgerService::record_expense(&mut state, dec!(80), "Food").unwrap();
    LedgerService::record_expense(&mut state, dec!(120), "Taxi").unwrap();

    let january = DateWindow::new(date(2024, 1, 1), date(2024, 2, 1)).unwrap();
    let totals = LedgerService::summary(&state, january);
    assert_eq!(totals.total_income, dec!(3000));
    assert_eq!(totals.total_expense, dec!(200));
    assert_eq!(totals.net, dec!(2800));

    let all = LedgerService::totals(&state);
    assert_eq!(all.total_expense, dec!(400));
    assert_eq!(all.net, dec!(2600));

    let categories = LedgerService::by_category(&state, TransactionKind::Expense);
    let names: Vec<(&str, usize)> = categories
        .iter()
        .map(|c| (c.category.as_str(), c.count))
        .collect();
    assert_eq!(names, vec![("Food", 2), ("Taxi", 1)]);
}

#[test]
fn window_end_must_follow_start() {
    assert!(DateWindow::new(date(2024, 2, 1), date(2024, 2, 1)).is_err());
}

#[test]
fn income_past_the_decimal_range_is_rejected() {
    let mut state = quiet_state();
    let ceiling = parse_amount("79228162514264337593543950335").expect("largest amount");
    LedgerService::record_income(&mut state, ceiling - dec!(20000), "Lottery").expect("fits");
    let balance = state.balance();
    let food = state.food();
    let energy = state.pet().energy();

    let err = LedgerService::record_income(&mut state, dec!(100000), "Salary")
        .expect_err("balance would overflow");
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert_eq!(state.balance(), balance);
    assert_eq!(state.food(), food);
    assert_eq!(state.pet().energy(), energy);
    assert_eq!(state.transactions().len(), 1);

    let totals = LedgerService::totals(&state);
    assert_eq!(totals.total_income, ceiling - dec!(20000));
}
