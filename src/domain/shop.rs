//! Static product catalog for buying food with real money.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub food_amount: u32,
    pub price: Decimal,
    #[serde(default)]
    pub bonus_eligible: bool,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        food_amount: u32,
        price: Decimal,
        bonus_eligible: bool,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            food_amount,
            price,
            bonus_eligible,
        }
    }
}

impl NamedEntity for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Amounted for Product {
    fn amount(&self) -> Decimal {
        self.price
    }
}

impl Displayable for Product {
    fn display_label(&self) -> String {
        format!("{} (+{} food) {:.2}", self.name, self.food_amount, self.price)
    }
}

/// Products offered when no catalog is configured.
pub fn default_catalog() -> Vec<Product> {
    vec![
        Product::new("snack", "Snack pack", 10, dec!(100), false),
        Product::new("meal", "Meal box", 50, dec!(450), false),
        Product::new("feast", "Feast crate", 120, dec!(1000), true),
    ]
}
