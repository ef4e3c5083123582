//! Stateless services. Each operation takes the session state, validates,
//! and then applies all of its effects or none.

pub mod account_service;
pub mod budget_service;
pub mod category_service;
pub mod goal_service;
pub mod ledger_service;
pub mod pet_service;
pub mod shop_service;
pub mod summary_service;

pub use account_service::{AccountService, AccountSnapshot};
pub use budget_service::BudgetService;
pub use category_service::CategoryService;
pub use goal_service::{ClaimOutcome, FundOutcome, GoalService};
pub use ledger_service::{ExpenseOutcome, IncomeOutcome, LedgerService, RecurringEntry};
pub use pet_service::{FeedOutcome, PetService, TickOutcome};
pub use shop_service::{PurchaseOutcome, ShopService};
pub use summary_service::{Overview, SummaryService};

use crate::errors::EngineError;

pub type ServiceResult<T> = Result<T, EngineError>;
