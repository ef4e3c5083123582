use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Failures reported by engine operations.
///
/// Every operation either applies all of its effects or returns one of these
/// and leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Not enough food: {required} required, {available} available")]
    InsufficientFoodCurrency { required: u32, available: u32 },
    #[error("Goal `{0}` is already completed")]
    GoalAlreadyCompleted(String),
    #[error("Reward for goal `{0}` was already claimed")]
    AlreadyClaimed(String),
    #[error("Goal `{0}` is not completed yet")]
    NotCompleted(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

/// Errors raised while loading or saving [`crate::config::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
