//! Tests for LocalRepository.
//!
//! These cover the transactional guarantees the application depends on
//! (all-or-nothing batches against the shared balance), the singleton
//! document defaults, item registry dedup, and concurrent access patterns.

mod support;

use std::sync::Arc;

use hearth_rust::api::{ExpenseCategory, ExpenseId, ExpenseUpdate};
use hearth_rust::db::repositories::LocalRepository;
use hearth_rust::db::repository::{
    BalanceRepository, ExpenseRepository, ItemRepository, RepositoryError, RosterRepository,
};
use hearth_rust::models::participant::Participant;

use support::{day, draft, other_draft, trio};

// =========================================================
// Balance & transactions
// =========================================================

#[tokio::test]
async fn test_balance_defaults_to_zero() {
    let repo = LocalRepository::new();
    assert_eq!(repo.balance().await.unwrap(), 0);
}

#[tokio::test]
async fn test_record_batch_debits_balance_and_stores_documents() {
    let repo = LocalRepository::new();
    repo.deposit(10_000).await.unwrap();

    let drafts = vec![
        draft("Bread", 800, "Wife A", ExpenseCategory::Breakfast),
        draft("Rice", 3000, "Wife B", ExpenseCategory::Lunch),
    ];
    let receipt = repo
        .record_expenses(day(2024, 3, 5), &drafts)
        .await
        .unwrap();

    assert_eq!(receipt.balance, 6200);
    assert_eq!(receipt.expenses.len(), 2);
    assert_eq!(repo.balance().await.unwrap(), 6200);
    assert_eq!(repo.expense_count(), 2);

    // Every stored document carries the batch date and a fresh id.
    for expense in &receipt.expenses {
        assert_eq!(expense.date, day(2024, 3, 5));
        assert!(repo.has_expense(&expense.id));
    }
}

#[tokio::test]
async fn test_insufficient_balance_rejects_whole_batch() {
    let repo = LocalRepository::new();
    repo.deposit(1000).await.unwrap();

    let drafts = vec![
        draft("Bread", 800, "Wife A", ExpenseCategory::Breakfast),
        draft("Rice", 3000, "Wife B", ExpenseCategory::Lunch),
    ];
    let err = repo
        .record_expenses(day(2024, 3, 5), &drafts)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    // Nothing was written: balance, documents and item registry untouched.
    assert_eq!(repo.balance().await.unwrap(), 1000);
    assert_eq!(repo.expense_count(), 0);
    assert!(repo.list_items().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_adjusts_balance_by_price_difference() {
    let repo = LocalRepository::new();
    repo.deposit(5000).await.unwrap();
    let receipt = repo
        .record_expenses(
            day(2024, 3, 5),
            &[draft("Beans", 1000, "Wife A", ExpenseCategory::Dinner)],
        )
        .await
        .unwrap();
    let id = receipt.expenses[0].id.clone();
    assert_eq!(receipt.balance, 4000);

    // Price up by 500: balance down by 500.
    let update = ExpenseUpdate {
        price: Some(1500),
        ..Default::default()
    };
    let updated = repo.update_expense(&id, &update).await.unwrap();
    assert_eq!(updated.price, 1500);
    assert_eq!(repo.balance().await.unwrap(), 3500);

    // Price down by 1000: balance up by 1000.
    let update = ExpenseUpdate {
        price: Some(500),
        ..Default::default()
    };
    repo.update_expense(&id, &update).await.unwrap();
    assert_eq!(repo.balance().await.unwrap(), 4500);
}

#[tokio::test]
async fn test_update_rejecting_insufficient_balance_changes_nothing() {
    let repo = LocalRepository::new();
    repo.deposit(1000).await.unwrap();
    let receipt = repo
        .record_expenses(
            day(2024, 3, 5),
            &[draft("Beans", 1000, "Wife A", ExpenseCategory::Dinner)],
        )
        .await
        .unwrap();
    let id = receipt.expenses[0].id.clone();
    assert_eq!(receipt.balance, 0);

    let update = ExpenseUpdate {
        price: Some(5000),
        ..Default::default()
    };
    let err = repo.update_expense(&id, &update).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    assert_eq!(repo.get_expense(&id).await.unwrap().price, 1000);
    assert_eq!(repo.balance().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_refunds_stored_price() {
    let repo = LocalRepository::new();
    repo.deposit(2000).await.unwrap();
    let receipt = repo
        .record_expenses(
            day(2024, 3, 5),
            &[draft("Yam", 1200, "Wife C", ExpenseCategory::Dinner)],
        )
        .await
        .unwrap();
    let id = receipt.expenses[0].id.clone();

    let balance = repo.delete_expense(&id).await.unwrap();
    assert_eq!(balance, 2000);
    assert_eq!(repo.expense_count(), 0);

    let err = repo.delete_expense(&id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_get_unknown_expense_is_not_found() {
    let repo = LocalRepository::new();
    let err = repo
        .get_expense(&ExpenseId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_expenses_sorted_by_date() {
    let repo = LocalRepository::new();
    repo.deposit(10_000).await.unwrap();
    repo.record_expenses(
        day(2024, 3, 7),
        &[draft("Later", 100, "Wife A", ExpenseCategory::Lunch)],
    )
    .await
    .unwrap();
    repo.record_expenses(
        day(2024, 3, 2),
        &[draft("Earlier", 100, "Wife A", ExpenseCategory::Lunch)],
    )
    .await
    .unwrap();

    let expenses = repo.list_expenses().await.unwrap();
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].item, "Earlier");
    assert_eq!(expenses[1].item, "Later");
}

// =========================================================
// Item registry
// =========================================================

#[tokio::test]
async fn test_item_registry_dedupes_case_insensitively() {
    let repo = LocalRepository::new();
    repo.deposit(10_000).await.unwrap();
    repo.record_expenses(
        day(2024, 3, 5),
        &[
            draft("Bread", 100, "Wife A", ExpenseCategory::Breakfast),
            draft("bread", 100, "Wife A", ExpenseCategory::Breakfast),
            draft("BREAD", 100, "Wife A", ExpenseCategory::Breakfast),
            other_draft("Soap", 300),
        ],
    )
    .await
    .unwrap();

    let items = repo.list_items().await.unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Bread", "Soap"]);
}

// =========================================================
// Singleton documents
// =========================================================

#[tokio::test]
async fn test_roster_defaults_to_household_trio() {
    let repo = LocalRepository::new();
    assert_eq!(repo.roster().await.unwrap(), trio());
}

#[tokio::test]
async fn test_roster_round_trip_keeps_order_and_duplicates() {
    let repo = LocalRepository::new();
    let roster = vec![
        Participant::new("Wife C"),
        Participant::new("Wife A"),
        Participant::new("Wife C"),
    ];
    repo.set_roster(&roster).await.unwrap();
    assert_eq!(repo.roster().await.unwrap(), roster);
}

#[tokio::test]
async fn test_clear_resets_all_documents() {
    let repo = LocalRepository::new();
    repo.deposit(500).await.unwrap();
    repo.set_roster(&[Participant::new("Wife B")]).await.unwrap();
    repo.clear();

    assert_eq!(repo.balance().await.unwrap(), 0);
    assert_eq!(repo.roster().await.unwrap(), trio());
    assert_eq!(repo.expense_count(), 0);
}

// =========================================================
// Health gating
// =========================================================

#[tokio::test]
async fn test_unhealthy_store_rejects_writes() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    assert!(!repo.health_check().await.unwrap());
    let err = repo.deposit(100).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConnectionError { .. }));
    assert!(err.is_retryable());

    repo.set_healthy(true);
    assert_eq!(repo.deposit(100).await.unwrap(), 100);
}

// =========================================================
// Concurrent Access Tests
// =========================================================

#[tokio::test]
async fn test_concurrent_deposits_all_apply() {
    let repo = Arc::new(LocalRepository::new());

    let mut handles = vec![];
    for _ in 0..10 {
        let repo_clone = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo_clone.deposit(100).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(repo.balance().await.unwrap(), 1000);
}

#[tokio::test]
async fn test_concurrent_batches_never_overdraw() {
    let repo = Arc::new(LocalRepository::new());
    repo.deposit(500).await.unwrap();

    // Ten writers each try to spend 100; exactly five can succeed.
    let mut handles = vec![];
    for i in 0..10 {
        let repo_clone = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            repo_clone
                .record_expenses(
                    day(2024, 3, 5),
                    &[draft(
                        &format!("Item {}", i),
                        100,
                        "Wife A",
                        ExpenseCategory::Lunch,
                    )],
                )
                .await
        }));
    }

    let mut committed = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            committed += 1;
        }
    }

    assert_eq!(committed, 5);
    assert_eq!(repo.balance().await.unwrap(), 0);
    assert_eq!(repo.expense_count(), 5);
}
