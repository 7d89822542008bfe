//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Domain types that already derive Serialize/Deserialize are re-exported
//! and used directly in payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export existing types that are already serializable
pub use crate::api::{
    DutyAssignment, Expense, ExpenseCategory, ExpenseDraft, ExpenseUpdate, Participant,
    SpendReceipt, StoredItem,
};
pub use crate::services::dashboard::DashboardData;
pub use crate::services::suggestion::ItemSuggestion;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Store connection status
    pub database: String,
}

/// Request body for recording a batch of expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordExpensesRequest {
    /// Calendar day the whole batch is dated with
    pub date: NaiveDate,
    /// Expenses to record
    pub expenses: Vec<ExpenseDraft>,
}

/// Response for a committed expense batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordExpensesResponse {
    /// Stored expense documents
    pub expenses: Vec<Expense>,
    /// Shared balance after the debit
    pub balance: i64,
    /// Message about the operation
    pub message: String,
}

/// Expense list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    /// Expense documents
    pub expenses: Vec<Expense>,
    /// Total count
    pub total: usize,
}

/// Response after deleting an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    /// Shared balance after the refund
    pub balance: i64,
    /// Message about the operation
    pub message: String,
}

/// Query parameters selecting a calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonthQuery {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}

/// Shared balance response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub balance: i64,
}

/// Request body for adding funds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFundsRequest {
    /// Amount to credit; must be strictly positive
    pub amount: i64,
}

/// Duty roster response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterResponse {
    /// Participants in rotation order
    pub participants: Vec<Participant>,
}

/// Request body for replacing the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRosterRequest {
    /// Participants in rotation order
    pub participants: Vec<Participant>,
}

/// Query parameters for the duty endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DutyQuery {
    /// Calendar day to compute duty for (today when omitted)
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Duty response for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutyResponse {
    /// The day the result applies to
    pub date: NaiveDate,
    /// Lunch owner for the day, absent for an empty roster
    pub primary: Option<Participant>,
    /// Meal assignments, in hand-off order
    pub assignments: Vec<DutyAssignment>,
}

/// Item list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemListResponse {
    /// Registered item names
    pub items: Vec<StoredItem>,
    /// Total count
    pub total: usize,
}

/// Request body for an item detail suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionRequest {
    /// Name of the new item being added
    pub item_name: String,
}
