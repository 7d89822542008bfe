//! Expense ledger domain types.
//!
//! Prices and balances are whole naira, stored as `i64`. Dates are calendar
//! days (serialized as `YYYY-MM-DD`); the store never keeps a time-of-day
//! component on an expense.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::participant::Participant;
use crate::api::{ExpenseId, ItemId};

/// Category an expense is filed under.
///
/// The meal categories tie an expense to the duty rotation; `Other` is for
/// everything else and is attributed to the unassigned sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Breakfast,
    Lunch,
    Dinner,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Breakfast,
        ExpenseCategory::Lunch,
        ExpenseCategory::Dinner,
        ExpenseCategory::Other,
    ];
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExpenseCategory::Breakfast => "Breakfast",
            ExpenseCategory::Lunch => "Lunch",
            ExpenseCategory::Dinner => "Dinner",
            ExpenseCategory::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

/// A stored expense document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub item: String,
    /// Price in whole naira.
    pub price: i64,
    pub date: NaiveDate,
    pub participant: Participant,
    pub category: ExpenseCategory,
}

/// An expense as submitted by the form layer, before the store assigns an id
/// and the batch date is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub item: String,
    pub price: i64,
    pub participant: Participant,
    pub category: ExpenseCategory,
}

impl ExpenseDraft {
    /// Materialize this draft into a stored expense.
    pub fn into_expense(self, id: ExpenseId, date: NaiveDate) -> Expense {
        Expense {
            id,
            item: self.item,
            price: self.price,
            date,
            participant: self.participant,
            category: self.category,
        }
    }
}

/// Partial update applied to a stored expense. `None` fields are left as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(default)]
    pub item: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub participant: Option<Participant>,
    #[serde(default)]
    pub category: Option<ExpenseCategory>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.item.is_none()
            && self.price.is_none()
            && self.participant.is_none()
            && self.category.is_none()
    }
}

/// Result of committing an expense batch: the stored documents and the
/// balance after the debit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendReceipt {
    pub expenses: Vec<Expense>,
    pub balance: i64,
}

/// A unique item name kept for autocomplete and suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: ItemId,
    pub name: String,
}
