use rust_decimal::Decimal;

use crate::core::services::ServiceResult;
use crate::core::state::DomainState;
use crate::domain::{Displayable, Product};
use crate::errors::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub product_id: String,
    pub balance: Decimal,
    pub food: u32,
    pub food_bought: u32,
    pub bonus_food: Option<u32>,
}

/// Buys food with real money from the configured catalog.
pub struct ShopService;

impl ShopService {
    pub fn catalog(state: &DomainState) -> &[Product] {
        &state.config.shop.catalog
    }

    pub fn product<'a>(state: &'a DomainState, product_id: &str) -> ServiceResult<&'a Product> {
        state
            .config
            .shop
            .catalog
            .iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| EngineError::ProductNotFound(product_id.to_string()))
    }

    pub fn purchase(state: &mut DomainState, product_id: &str) -> ServiceResult<PurchaseOutcome> {
        let product = Self::product(state, product_id)?.clone();
        state.ensure_funds(product.price).inspect_err(|err| {
            tracing::debug!(product = %product.id, %err, "purchase rejected");
        })?;

        let bonus_food = if product.bonus_eligible {
            let roll = state.config.shop.purchase_bonus;
            state.bonus.roll(&roll)
        } else {
            None
        };

        state.balance -= product.price;
        state.credit_food(product.food_amount);
        if let Some(bonus) = bonus_food {
            state.credit_food(bonus);
        }

        tracing::debug!(
            product = %product.display_label(),
            balance = %state.balance,
            food = state.food,
            ?bonus_food,
            "product purchased"
        );
        Ok(PurchaseOutcome {
            product_id: product.id,
            balance: state.balance,
            food: state.food,
            food_bought: product.food_amount,
            bonus_food,
        })
    }
}
