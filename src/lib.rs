#![doc(test(attr(deny(warnings))))]

//! CashPet Core is the domain engine behind a finance-tracking virtual pet:
//! a ledger with a running balance, savings goals with food rewards, a pet
//! whose energy reacts to spending and time, and a small food shop.
//!
//! All state lives in one [`DomainState`]; services in [`crate::core::services`]
//! mutate it all-or-nothing, and [`Engine`] shares it with a periodic ticker.
//!
//! ```
//! use cashpet_core::core::services::LedgerService;
//! use cashpet_core::DomainState;
//! use rust_decimal_macros::dec;
//!
//! let mut state = DomainState::with_defaults().unwrap();
//! let outcome = LedgerService::record_income(&mut state, dec!(1000), "Salary").unwrap();
//! assert_eq!(outcome.balance, dec!(16000.50));
//! assert_eq!(outcome.energy, 90);
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

pub use crate::config::{ConfigManager, EngineConfig};
pub use crate::core::{DomainState, Engine};
pub use crate::errors::{ConfigError, EngineError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and logs the build being run.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(build = %build.short_label(), "CashPet Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
