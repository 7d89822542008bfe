//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory behind a single `RwLock`; each composite operation holds the write
//! lock for its whole duration, which gives exactly the all-or-nothing
//! semantics the document store's transaction primitive provides.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::models::{
    Expense, ExpenseDraft, ExpenseId, ExpenseUpdate, ItemId, SpendReceipt, StoredItem,
};
use crate::db::repository::{
    BalanceRepository, ErrorContext, ExpenseRepository, ItemRepository, RepositoryError,
    RepositoryResult, RosterRepository,
};
use crate::models::participant::{default_roster, Participant};

/// In-memory local repository.
///
/// Ideal for tests and local development: fast, deterministic, isolated.
/// Cloning shares the underlying data, mirroring how multiple handles to
/// the same database behave.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    expenses: HashMap<ExpenseId, Expense>,
    items: Vec<StoredItem>,

    // Singleton documents; `None` until first access seeds the default.
    balance: Option<i64>,
    roster: Option<Vec<Participant>>,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            expenses: HashMap::new(),
            items: Vec::new(),
            balance: None,
            roster: None,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let healthy = data.is_healthy;
        *data = LocalData {
            is_healthy: healthy,
            ..Default::default()
        };
    }

    /// Number of expense documents stored.
    pub fn expense_count(&self) -> usize {
        self.data.read().expenses.len()
    }

    /// Check if an expense document exists.
    pub fn has_expense(&self, id: &ExpenseId) -> bool {
        self.data.read().expenses.contains_key(id)
    }

    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection("Store is not healthy"));
        }
        Ok(())
    }
}

impl LocalData {
    /// Balance amount, seeding the default document on first access.
    fn balance_or_default(&mut self) -> i64 {
        *self.balance.get_or_insert(0)
    }

    /// Register an item name if no case-insensitive match exists yet.
    fn register_item(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        let lowered = name.to_lowercase();
        if self
            .items
            .iter()
            .any(|item| item.name.to_lowercase() == lowered)
        {
            return;
        }
        self.items.push(StoredItem {
            id: ItemId::generate(),
            name: name.to_string(),
        });
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExpenseRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn record_expenses(
        &self,
        date: NaiveDate,
        drafts: &[ExpenseDraft],
    ) -> RepositoryResult<SpendReceipt> {
        self.check_health()?;

        let mut data = self.data.write();

        let total: i64 = drafts.iter().map(|d| d.price).sum();
        let current = data.balance_or_default();
        let new_balance = current - total;
        if new_balance < 0 {
            return Err(RepositoryError::validation_with_context(
                "Insufficient balance",
                ErrorContext::new("record_expenses")
                    .with_entity("balance")
                    .with_details(format!("balance={}, batch_total={}", current, total)),
            ));
        }

        data.balance = Some(new_balance);

        let mut stored = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let expense = draft.clone().into_expense(ExpenseId::generate(), date);
            data.expenses.insert(expense.id.clone(), expense.clone());
            stored.push(expense);
        }

        for draft in drafts {
            data.register_item(&draft.item);
        }

        Ok(SpendReceipt {
            expenses: stored,
            balance: new_balance,
        })
    }

    async fn get_expense(&self, id: &ExpenseId) -> RepositoryResult<Expense> {
        let data = self.data.read();
        data.expenses.get(id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Expense {} not found", id),
                ErrorContext::new("get_expense")
                    .with_entity("expense")
                    .with_entity_id(id),
            )
        })
    }

    async fn list_expenses(&self) -> RepositoryResult<Vec<Expense>> {
        let data = self.data.read();
        let mut expenses: Vec<Expense> = data.expenses.values().cloned().collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(expenses)
    }

    async fn update_expense(
        &self,
        id: &ExpenseId,
        update: &ExpenseUpdate,
    ) -> RepositoryResult<Expense> {
        self.check_health()?;

        let mut data = self.data.write();

        let original = data.expenses.get(id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Expense {} not found", id),
                ErrorContext::new("update_expense")
                    .with_entity("expense")
                    .with_entity_id(id),
            )
        })?;

        let new_price = update.price.unwrap_or(original.price);
        let price_difference = new_price - original.price;
        let current = data.balance_or_default();
        let new_balance = current - price_difference;
        if new_balance < 0 {
            return Err(RepositoryError::validation_with_context(
                "Insufficient balance for this update",
                ErrorContext::new("update_expense")
                    .with_entity("balance")
                    .with_entity_id(id)
                    .with_details(format!(
                        "balance={}, price_difference={}",
                        current, price_difference
                    )),
            ));
        }

        data.balance = Some(new_balance);

        let mut updated = original;
        if let Some(ref item) = update.item {
            updated.item = item.clone();
            data.register_item(item);
        }
        updated.price = new_price;
        if let Some(ref participant) = update.participant {
            updated.participant = participant.clone();
        }
        if let Some(category) = update.category {
            updated.category = category;
        }

        data.expenses.insert(id.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete_expense(&self, id: &ExpenseId) -> RepositoryResult<i64> {
        self.check_health()?;

        let mut data = self.data.write();

        let expense = data.expenses.remove(id).ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Expense {} not found", id),
                ErrorContext::new("delete_expense")
                    .with_entity("expense")
                    .with_entity_id(id),
            )
        })?;

        let new_balance = data.balance_or_default() + expense.price;
        data.balance = Some(new_balance);
        Ok(new_balance)
    }
}

#[async_trait]
impl BalanceRepository for LocalRepository {
    async fn balance(&self) -> RepositoryResult<i64> {
        self.check_health()?;
        Ok(self.data.write().balance_or_default())
    }

    async fn deposit(&self, amount: i64) -> RepositoryResult<i64> {
        self.check_health()?;

        let mut data = self.data.write();
        let new_balance = data.balance_or_default() + amount;
        data.balance = Some(new_balance);
        Ok(new_balance)
    }
}

#[async_trait]
impl RosterRepository for LocalRepository {
    async fn roster(&self) -> RepositoryResult<Vec<Participant>> {
        self.check_health()?;
        let mut data = self.data.write();
        Ok(data.roster.get_or_insert_with(default_roster).clone())
    }

    async fn set_roster(&self, roster: &[Participant]) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().roster = Some(roster.to_vec());
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for LocalRepository {
    async fn list_items(&self) -> RepositoryResult<Vec<StoredItem>> {
        Ok(self.data.read().items.clone())
    }
}
