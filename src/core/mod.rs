//! Session state, the services that mutate it, and the shared engine handle.

pub mod bonus;
pub mod clock;
pub mod engine;
pub mod services;
pub mod state;

pub use bonus::BonusSource;
pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{Engine, TickerHandle};
pub use state::DomainState;
