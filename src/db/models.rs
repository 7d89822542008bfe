//! Shared data models re-exported for store layer consumers.

pub use crate::api::{
    Expense, ExpenseCategory, ExpenseDraft, ExpenseId, ExpenseUpdate, ItemId, SpendReceipt,
    StoredItem,
};
pub use crate::models::participant::{Meal, Participant};
