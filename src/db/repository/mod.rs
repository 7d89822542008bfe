//! Repository traits for the household document store.
//!
//! The store keeps four kinds of documents: expense documents (one per
//! logged expense), a singleton balance document, a singleton roster
//! document, and item documents (unique item names). Composite operations
//! that touch the balance together with other documents are atomic: the
//! backing store's transaction primitive guarantees all-or-nothing
//! behaviour, and implementations of these traits must preserve that.

mod error;

use async_trait::async_trait;
use chrono::NaiveDate;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::api::{Expense, ExpenseDraft, ExpenseId, ExpenseUpdate, SpendReceipt, StoredItem};
use crate::models::participant::Participant;

/// Repository trait for expense document operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// Check if the store connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the connection is healthy
    /// - `Ok(false)` if the connection is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if an error occurred during the check
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Atomically record a batch of expenses dated `date`.
    ///
    /// In one transaction: the shared balance is debited by the batch total
    /// (rejected with a validation error if it would go negative), one
    /// document per draft is inserted, and any item names not yet in the
    /// item registry are added (case-insensitively).
    ///
    /// # Arguments
    /// * `date` - Calendar day every expense in the batch is dated with
    /// * `drafts` - The expenses to record
    ///
    /// # Returns
    /// * `Ok(SpendReceipt)` - Stored documents plus the post-debit balance
    /// * `Err(RepositoryError)` - If the transaction is rejected or fails
    async fn record_expenses(
        &self,
        date: NaiveDate,
        drafts: &[ExpenseDraft],
    ) -> RepositoryResult<SpendReceipt>;

    /// Retrieve a single expense by ID.
    ///
    /// # Returns
    /// * `Ok(Expense)` - The expense document
    /// * `Err(RepositoryError::NotFound)` - If no such document exists
    async fn get_expense(&self, id: &ExpenseId) -> RepositoryResult<Expense>;

    /// List all expense documents.
    async fn list_expenses(&self) -> RepositoryResult<Vec<Expense>>;

    /// Atomically update an expense, adjusting the balance by the price
    /// difference.
    ///
    /// A price increase debits the balance by the difference and is rejected
    /// if the balance would go negative; a decrease credits it.
    ///
    /// # Returns
    /// * `Ok(Expense)` - The updated document
    /// * `Err(RepositoryError::NotFound)` - If no such document exists
    async fn update_expense(
        &self,
        id: &ExpenseId,
        update: &ExpenseUpdate,
    ) -> RepositoryResult<Expense>;

    /// Atomically delete an expense, refunding its price to the balance.
    ///
    /// # Returns
    /// * `Ok(i64)` - The balance after the refund
    /// * `Err(RepositoryError::NotFound)` - If no such document exists
    async fn delete_expense(&self, id: &ExpenseId) -> RepositoryResult<i64>;
}

/// Repository trait for the singleton balance document.
#[async_trait]
pub trait BalanceRepository: Send + Sync {
    /// Current shared balance.
    ///
    /// The first read creates the default document with amount zero, the
    /// same way the application seeds the store on first launch.
    async fn balance(&self) -> RepositoryResult<i64>;

    /// Atomically credit the balance.
    ///
    /// # Returns
    /// * `Ok(i64)` - The balance after the deposit
    async fn deposit(&self, amount: i64) -> RepositoryResult<i64>;
}

/// Repository trait for the singleton roster document.
#[async_trait]
pub trait RosterRepository: Send + Sync {
    /// Current duty roster, in rotation order.
    ///
    /// The first read creates the default document containing all three
    /// household participants.
    async fn roster(&self) -> RepositoryResult<Vec<Participant>>;

    /// Replace the roster. Order is significant and duplicates are kept.
    async fn set_roster(&self, roster: &[Participant]) -> RepositoryResult<()>;
}

/// Repository trait for the unique item registry.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// List the registered item names.
    ///
    /// Names are unique case-insensitively; the first-seen casing is kept.
    async fn list_items(&self) -> RepositoryResult<Vec<StoredItem>>;
}

/// Combined repository trait for consumers needing the full store.
pub trait FullRepository:
    ExpenseRepository + BalanceRepository + RosterRepository + ItemRepository
{
}

impl<T> FullRepository for T where
    T: ExpenseRepository + BalanceRepository + RosterRepository + ItemRepository
{
}
