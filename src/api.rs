//! Public API surface for the Hearth backend.
//!
//! This file consolidates the identifier newtypes and re-exports the domain
//! types used across the repository, service, and HTTP layers. All types
//! derive Serialize/Deserialize for JSON serialization.

pub use crate::models::duty::{DutyAssignment, DutyResult};
pub use crate::models::expense::{
    Expense, ExpenseCategory, ExpenseDraft, ExpenseUpdate, SpendReceipt, StoredItem,
};
pub use crate::models::participant::{Meal, Participant};

use serde::{Deserialize, Serialize};

/// Expense document identifier (store-assigned, opaque).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExpenseId(pub String);

/// Stored item identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ExpenseId {
    pub fn new(value: impl Into<String>) -> Self {
        ExpenseId(value.into())
    }

    /// Generate a fresh document id, the way the document store would.
    pub fn generate() -> Self {
        ExpenseId(uuid::Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        ItemId(value.into())
    }

    pub fn generate() -> Self {
        ItemId(uuid::Uuid::new_v4().to_string())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ExpenseId> for String {
    fn from(id: ExpenseId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_id_roundtrip() {
        let id = ExpenseId::new("abc123");
        assert_eq!(id.value(), "abc123");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ExpenseId::generate();
        let b = ExpenseId::generate();
        assert_ne!(a, b);
    }
}
