//! Ledger entries.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::domain::schedule::Frequency;
use crate::errors::EngineError;

/// Longest free-text description kept on an entry.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// An append-only ledger entry. `amount` is always positive; the direction
/// of money flow is carried by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Set when the entry repeats; the entry's date anchors the series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Frequency>,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            kind,
            category: category.into(),
            description: None,
            recurrence: None,
        }
    }

    pub fn with_details(mut self, details: EntryDetails) -> Self {
        self.description = details.description;
        self.recurrence = details.recurrence;
        self
    }

    /// Amount with the sign implied by `kind`.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Transaction {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let mut label = format!(
            "{} {} {:.2} [{}]",
            self.date, self.kind, self.amount, self.category
        );
        if let Some(description) = &self.description {
            label.push_str(" ");
            label.push_str(description);
        }
        if let Some(frequency) = self.recurrence {
            label.push_str(&format!(" ({frequency})"));
        }
        label
    }
}

/// Optional extras for a new ledger entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDetails {
    pub description: Option<String>,
    pub recurrence: Option<Frequency>,
}

impl EntryDetails {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            recurrence: None,
        }
    }

    pub fn repeating(mut self, frequency: Frequency) -> Self {
        self.recurrence = Some(frequency);
        self
    }

    /// Trims the description, drops it when blank, and rejects overlong text.
    pub(crate) fn normalized(self) -> Result<Self, EngineError> {
        let description = match self.description {
            Some(text) => {
                let trimmed = text.trim();
                if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
                    return Err(EngineError::InvalidInput(format!(
                        "description is longer than {MAX_DESCRIPTION_LEN} characters"
                    )));
                }
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            None => None,
        };
        Ok(Self {
            description,
            recurrence: self.recurrence,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = EngineError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(EngineError::InvalidInput(format!(
                "category type must be `income` or `expense`, got `{other}`"
            ))),
        }
    }
}

/// Income and expense totals over a window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LedgerTotals {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net: Decimal,
}

impl LedgerTotals {
    /// Adds one entry. Totals saturate rather than overflow.
    pub fn record(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionKind::Income => {
                self.total_income = self.total_income.saturating_add(txn.amount)
            }
            TransactionKind::Expense => {
                self.total_expense = self.total_expense.saturating_add(txn.amount)
            }
        }
        self.net = self.net.saturating_add(txn.signed_amount());
    }
}

/// Sum of all transactions of one kind sharing a category label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
}
