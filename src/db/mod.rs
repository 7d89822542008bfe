//! Store module for household expense, balance, roster and item data.
//!
//! This module provides abstractions for store operations via the Repository
//! pattern, allowing different storage backends to be swapped easily.
//!
//! # Repository Pattern
//! The module includes:
//! - `services`: High-level business logic functions (use these in your application!)
//! - `repository`: Trait definitions for store operations
//! - `repositories::local`: In-memory implementation for unit testing and local development
//! - `factory`: Factory for creating repository instances
//! - `repo_config`: TOML configuration file support
//!
//! # Recommended Usage
//!
//! **For new code, use the service layer:**
//! ```ignore
//! use hearth_rust::db::{services, factory::RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::from_env()?;
//!
//!     // Use service layer functions
//!     let expenses = services::list_expenses(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// ==================== Service Layer (Recommended for new code) ====================
// Use these high-level functions that work with any repository implementation

pub use services::{
    add_funds, current_balance, delete_expense, expenses_for_month, get_expense, get_roster,
    health_check, list_expenses, list_items, move_participant, record_expenses, set_roster,
    toggle_participant, update_expense, MoveDirection,
};

// ==================== Repository Pattern Exports ====================

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
pub use repositories::LocalRepository;
pub use repository::{
    BalanceRepository, ErrorContext, ExpenseRepository, FullRepository, ItemRepository,
    RepositoryError, RepositoryResult, RosterRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

/// Initialize the global repository singleton for the configured backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = RepositoryFactory::from_env().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Store not initialized. Call init_repository() first.")
}
