//! Shared traits, date windows, and money helpers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::EngineError;

/// Exposes a stable identifier for entities owned by the engine.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to an entity's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Supplies a common contract for retrieving money amounts.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Converts an entity into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Index of the entity carrying `id`.
pub fn position_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Entity whose name matches `name`, ignoring case and surrounding spaces.
pub fn find_by_name<'a, T: NamedEntity>(items: &'a [T], name: &str) -> Option<&'a T> {
    let wanted = name.trim();
    items
        .iter()
        .find(|item| item.name().trim().eq_ignore_ascii_case(wanted))
}

/// Sum of amounts, saturating at the representable bounds.
pub fn sum_amounts<'a, T, I>(items: I) -> Decimal
where
    T: Amounted + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .fold(Decimal::ZERO, |total, item| total.saturating_add(item.amount()))
}

/// Half-open date range: `start` is included, `end` is not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if end <= start {
            return Err(EngineError::InvalidInput(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Window covering every representable date.
    pub fn unbounded() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// Parses user-entered money text.
///
/// Accepts surrounding whitespace and a comma as decimal separator. Anything
/// that does not parse, or parses to zero or less, is an `InvalidAmount`.
pub fn parse_amount(raw: &str) -> Result<Decimal, EngineError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(|ch| if ch == ',' { '.' } else { ch })
        .collect();
    let value: Decimal = cleaned
        .parse()
        .map_err(|_| EngineError::InvalidAmount(format!("`{}` is not a number", raw.trim())))?;
    ensure_positive(value)?;
    Ok(value)
}

pub(crate) fn ensure_positive(amount: Decimal) -> Result<(), EngineError> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "{amount} must be greater than zero"
        )));
    }
    Ok(())
}
