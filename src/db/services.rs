//! High-level store service layer.
//!
//! This module provides repository-agnostic operations that work with any
//! implementation of the repository traits. Business rules that must hold
//! regardless of the storage backend live here: batch validation, the
//! category/participant coherence rule, deposit validation, and roster
//! hygiene. The repository itself only enforces the transaction-level
//! invariant (the balance never goes negative).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, tests)                    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! │  - Batch and field validation                            │
//! │  - Roster management rules                               │
//! │  - Cross-cutting concerns                                │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, NaiveDate};
use log::{info, warn};

use super::repository::{ErrorContext, FullRepository, RepositoryError, RepositoryResult};
use crate::api::{
    Expense, ExpenseCategory, ExpenseDraft, ExpenseId, ExpenseUpdate, SpendReceipt, StoredItem,
};
use crate::models::participant::Participant;

/// Direction for [`move_participant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

// ==================== Health & Connection ====================

/// Check if the store connection is healthy.
///
/// # Arguments
/// * `repo` - Repository implementation
///
/// # Returns
/// * `Ok(true)` if connection is healthy
/// * `Err` if check fails
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Expense Operations ====================

/// Validate a single expense draft.
///
/// Rules mirror the entry form: item name required, price strictly positive,
/// and attribution coherent with the category — meal categories need a real
/// participant while `Other` belongs to the unassigned sentinel.
fn validate_draft(index: usize, draft: &ExpenseDraft) -> RepositoryResult<()> {
    let context = || {
        ErrorContext::new("record_expenses")
            .with_entity("expense")
            .with_details(format!("batch index {}", index))
    };

    if draft.item.trim().is_empty() {
        return Err(RepositoryError::validation_with_context(
            "Item name is required",
            context(),
        ));
    }
    if draft.price <= 0 {
        return Err(RepositoryError::validation_with_context(
            "Price must be positive",
            context(),
        ));
    }
    match draft.category {
        ExpenseCategory::Other => {
            if !draft.participant.is_unassigned() {
                return Err(RepositoryError::validation_with_context(
                    "Category 'Other' is not attributed to a participant",
                    context(),
                ));
            }
        }
        _ => {
            if draft.participant.is_unassigned() {
                return Err(RepositoryError::validation_with_context(
                    "Please select a participant for this category",
                    context(),
                ));
            }
        }
    }
    Ok(())
}

/// Record a dated batch of expenses with full business logic.
///
/// Every draft is validated before anything is written; the repository then
/// commits the batch atomically (balance debit, document inserts, item
/// registration) or not at all.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `date` - Calendar day for the whole batch
/// * `drafts` - Expenses to record
///
/// # Returns
/// * `Ok(SpendReceipt)` - Stored expenses plus the post-debit balance
/// * `Err` if validation fails or the transaction is rejected
pub async fn record_expenses<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
    drafts: &[ExpenseDraft],
) -> RepositoryResult<SpendReceipt> {
    if drafts.is_empty() {
        return Err(RepositoryError::validation(
            "Please add at least one expense",
        ));
    }
    for (index, draft) in drafts.iter().enumerate() {
        validate_draft(index, draft)?;
    }

    let total: i64 = drafts.iter().map(|d| d.price).sum();
    info!(
        "Service layer: recording {} expense(s) dated {} (total {})",
        drafts.len(),
        date,
        total
    );

    let receipt = repo.record_expenses(date, drafts).await?;
    info!(
        "Service layer: batch committed, balance is now {}",
        receipt.balance
    );
    Ok(receipt)
}

/// Retrieve a single expense by ID.
///
/// # Returns
/// * `Ok(Expense)` - The expense document
/// * `Err` if the expense is not found or retrieval fails
pub async fn get_expense<R: FullRepository + ?Sized>(
    repo: &R,
    id: &ExpenseId,
) -> RepositoryResult<Expense> {
    repo.get_expense(id).await
}

/// List all expenses.
pub async fn list_expenses<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Expense>> {
    info!("Service layer: listing all expenses");
    repo.list_expenses().await
}

/// List the expenses of one calendar month.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `year` - Calendar year
/// * `month` - Calendar month (1-12)
pub async fn expenses_for_month<R: FullRepository + ?Sized>(
    repo: &R,
    year: i32,
    month: u32,
) -> RepositoryResult<Vec<Expense>> {
    if !(1..=12).contains(&month) {
        return Err(RepositoryError::validation(format!(
            "Invalid month: {}",
            month
        )));
    }

    let expenses = repo.list_expenses().await?;
    Ok(expenses
        .into_iter()
        .filter(|e| e.date.year() == year && e.date.month() == month)
        .collect())
}

/// Update an expense, adjusting the balance by the price difference.
///
/// # Returns
/// * `Ok(Expense)` - The updated document
/// * `Err` if validation fails, the expense is missing, or the adjustment
///   would make the balance negative
pub async fn update_expense<R: FullRepository + ?Sized>(
    repo: &R,
    id: &ExpenseId,
    update: &ExpenseUpdate,
) -> RepositoryResult<Expense> {
    if update.is_empty() {
        return Err(RepositoryError::validation("Nothing to update"));
    }
    if let Some(ref item) = update.item {
        if item.trim().is_empty() {
            return Err(RepositoryError::validation("Item name is required"));
        }
    }
    if let Some(price) = update.price {
        if price <= 0 {
            return Err(RepositoryError::validation("Price must be positive"));
        }
    }

    info!("Service layer: updating expense {}", id);
    repo.update_expense(id, update).await
}

/// Delete an expense, refunding its price to the balance.
///
/// # Returns
/// * `Ok(i64)` - The balance after the refund
/// * `Err` if the expense is not found
pub async fn delete_expense<R: FullRepository + ?Sized>(
    repo: &R,
    id: &ExpenseId,
) -> RepositoryResult<i64> {
    info!("Service layer: deleting expense {}", id);
    repo.delete_expense(id).await
}

// ==================== Balance Operations ====================

/// Current shared balance.
pub async fn current_balance<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<i64> {
    repo.balance().await
}

/// Add funds to the shared balance.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `amount` - Amount to credit; must be strictly positive
///
/// # Returns
/// * `Ok(i64)` - The balance after the deposit
pub async fn add_funds<R: FullRepository + ?Sized>(
    repo: &R,
    amount: i64,
) -> RepositoryResult<i64> {
    if amount <= 0 {
        return Err(RepositoryError::validation_with_context(
            "Please enter a positive amount",
            ErrorContext::new("add_funds").with_entity("balance"),
        ));
    }
    info!("Service layer: adding {} to the shared balance", amount);
    repo.deposit(amount).await
}

// ==================== Roster Operations ====================

/// Current duty roster, in rotation order.
pub async fn get_roster<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Participant>> {
    repo.roster().await
}

/// Replace the duty roster.
///
/// Order is significant and duplicates are kept (each position is a
/// rotation slot). The unassigned sentinel is an attribution value, not a
/// caregiver, and is rejected here so the rotation never sees it.
pub async fn set_roster<R: FullRepository + ?Sized>(
    repo: &R,
    roster: &[Participant],
) -> RepositoryResult<()> {
    if roster.iter().any(|p| p.is_unassigned()) {
        return Err(RepositoryError::validation_with_context(
            "The unassigned sentinel cannot join the roster",
            ErrorContext::new("set_roster").with_entity("roster"),
        ));
    }
    if roster.iter().any(|p| p.name().trim().is_empty()) {
        return Err(RepositoryError::validation_with_context(
            "Participant names must not be empty",
            ErrorContext::new("set_roster").with_entity("roster"),
        ));
    }

    info!("Service layer: replacing roster ({} slot(s))", roster.len());
    repo.set_roster(roster).await
}

/// Toggle a participant's availability.
///
/// An absent participant is appended at the end of the roster; a present
/// one is removed from every slot.
///
/// # Returns
/// * `Ok(Vec<Participant>)` - The roster after the change
pub async fn toggle_participant<R: FullRepository + ?Sized>(
    repo: &R,
    participant: &Participant,
) -> RepositoryResult<Vec<Participant>> {
    let mut roster = repo.roster().await?;

    if roster.contains(participant) {
        info!("Service layer: {} is now unavailable", participant);
        roster.retain(|p| p != participant);
    } else {
        info!("Service layer: {} is now available", participant);
        roster.push(participant.clone());
    }

    set_roster(repo, &roster).await?;
    Ok(roster)
}

/// Move a participant one slot up or down in the rotation order.
///
/// Moving past either end leaves the roster unchanged.
///
/// # Returns
/// * `Ok(Vec<Participant>)` - The roster after the change
/// * `Err(RepositoryError::NotFound)` - If the participant is not rostered
pub async fn move_participant<R: FullRepository + ?Sized>(
    repo: &R,
    participant: &Participant,
    direction: MoveDirection,
) -> RepositoryResult<Vec<Participant>> {
    let mut roster = repo.roster().await?;

    let current = roster.iter().position(|p| p == participant).ok_or_else(|| {
        RepositoryError::not_found_with_context(
            format!("{} is not on the roster", participant),
            ErrorContext::new("move_participant").with_entity("roster"),
        )
    })?;

    let target = match direction {
        MoveDirection::Up => current.checked_sub(1),
        MoveDirection::Down => {
            if current + 1 < roster.len() {
                Some(current + 1)
            } else {
                None
            }
        }
    };

    match target {
        Some(target) => {
            roster.swap(current, target);
            set_roster(repo, &roster).await?;
        }
        None => {
            warn!(
                "Service layer: cannot move {} further {:?}",
                participant, direction
            );
        }
    }

    Ok(roster)
}

// ==================== Item Registry ====================

/// List the registered unique item names.
pub async fn list_items<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<StoredItem>> {
    repo.list_items().await
}
