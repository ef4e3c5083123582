mod common;

use cashpet_core::core::services::{PetService, ShopService};
use rust_decimal_macros::dec;

use common::quiet_state;

#[test]
fn buying_food_then_feeding() {
    let mut state = quiet_state();
    let outcome = ShopService::purchase(&mut state, "meal").expect("purchase");
    assert_eq!(outcome.balance, dec!(14550.50));
    assert_eq!(outcome.food_bought, 50);
    assert_eq!(outcome.food, 50);
    assert_eq!(outcome.bonus_food, None);

    let fed = PetService::feed(&mut state).expect("feed");
    assert_eq!(fed.food, 40);
    assert_eq!(fed.energy, 100);
}

#[test]
fn catalog_lists_configured_products() {
    let state = quiet_state();
    let ids: Vec<&str> = ShopService::catalog(&state)
        .iter()
        .map(|product| product.id.as_str())
        .collect();
    assert_eq!(ids, vec!["snack", "meal", "feast"]);
    assert_eq!(ShopService::product(&state, "feast").unwrap().price, dec!(1000));
}
