//! Plain data types owned by the domain state. No I/O, no scheduling.

pub mod budget;
pub mod category;
pub mod common;
pub mod goal;
pub mod pet;
pub mod schedule;
pub mod shop;
pub mod transaction;

pub use budget::{BudgetScope, BudgetStatus, CategoryBudget};
pub use category::Category;
pub use common::{parse_amount, Amounted, DateWindow, Displayable, Identifiable, NamedEntity};
pub use goal::{Goal, GoalProgress, ProgressTier};
pub use pet::{Appearance, Mood, PetAction, PetActionKind, PetEvent, PetState, PetView};
pub use schedule::{BudgetPeriod, Frequency};
pub use shop::Product;
pub use transaction::{CategoryTotal, EntryDetails, LedgerTotals, Transaction, TransactionKind};
