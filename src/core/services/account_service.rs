//! Account-level data coming from outside the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::state::DomainState;
use crate::errors::EngineError;

/// Account snapshot as served by `GET /users/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub name: String,
    #[serde(alias = "current_balance")]
    pub balance: Decimal,
}

impl AccountSnapshot {
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            user_id: None,
            name: name.into(),
            balance,
        }
    }

    /// Shape check only; values are taken as given.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        serde_json::from_str(raw)
            .map_err(|err| EngineError::InvalidInput(format!("malformed account snapshot: {err}")))
    }
}

pub struct AccountService;

impl AccountService {
    /// Overwrites the balance and display name with the snapshot's values.
    pub fn apply_snapshot(state: &mut DomainState, snapshot: AccountSnapshot) {
        tracing::info!(
            user_id = ?snapshot.user_id,
            name = %snapshot.name,
            previous = %state.balance,
            balance = %snapshot.balance,
            "account snapshot applied"
        );
        state.balance = snapshot.balance;
        state.display_name = snapshot.name;
    }

    pub fn balance(state: &DomainState) -> Decimal {
        state.balance
    }

    pub fn display_name(state: &DomainState) -> &str {
        &state.display_name
    }
}
