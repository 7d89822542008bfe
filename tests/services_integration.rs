//! Integration tests for the service layer.
//!
//! The service layer owns the business rules the store itself does not:
//! field validation, category/participant coherence, roster hygiene, and
//! the orchestration glue between the persisted roster and the duty
//! calculator.

mod support;

use hearth_rust::api::{ExpenseCategory, ExpenseDraft, ExpenseId, ExpenseUpdate};
use hearth_rust::db::repositories::LocalRepository;
use hearth_rust::db::repository::RepositoryError;
use hearth_rust::db::{services, MoveDirection};
use hearth_rust::duty::{DutyCalculator, RotationPolicy};
use hearth_rust::models::participant::Participant;
use hearth_rust::services::dashboard::compute_dashboard;
use hearth_rust::services::duty_board;
use hearth_rust::services::suggestion::{HistorySuggester, SuggestionProvider};

use support::{day, draft, other_draft, trio};

async fn funded_repo(amount: i64) -> LocalRepository {
    let repo = LocalRepository::new();
    services::add_funds(&repo, amount).await.unwrap();
    repo
}

// =========================================================
// Expense validation
// =========================================================

#[tokio::test]
async fn test_empty_batch_is_rejected() {
    let repo = funded_repo(1000).await;
    let err = services::record_expenses(&repo, day(2024, 3, 5), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_blank_item_name_is_rejected() {
    let repo = funded_repo(1000).await;
    let drafts = vec![draft("   ", 100, "Wife A", ExpenseCategory::Lunch)];
    let err = services::record_expenses(&repo, day(2024, 3, 5), &drafts)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Item name is required"));
}

#[tokio::test]
async fn test_non_positive_price_is_rejected() {
    let repo = funded_repo(1000).await;
    for price in [0, -50] {
        let drafts = vec![draft("Bread", price, "Wife A", ExpenseCategory::Breakfast)];
        let err = services::record_expenses(&repo, day(2024, 3, 5), &drafts)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Price must be positive"));
    }
}

#[tokio::test]
async fn test_meal_category_needs_a_real_participant() {
    let repo = funded_repo(1000).await;
    let drafts = vec![ExpenseDraft {
        item: "Rice".to_string(),
        price: 100,
        participant: Participant::unassigned(),
        category: ExpenseCategory::Lunch,
    }];
    let err = services::record_expenses(&repo, day(2024, 3, 5), &drafts)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_other_category_must_stay_unattributed() {
    let repo = funded_repo(1000).await;
    let drafts = vec![ExpenseDraft {
        item: "Soap".to_string(),
        price: 100,
        participant: Participant::new("Wife A"),
        category: ExpenseCategory::Other,
    }];
    let err = services::record_expenses(&repo, day(2024, 3, 5), &drafts)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    // The sentinel attribution is the accepted form.
    let receipt = services::record_expenses(&repo, day(2024, 3, 5), &[other_draft("Soap", 100)])
        .await
        .unwrap();
    assert!(receipt.expenses[0].participant.is_unassigned());
}

#[tokio::test]
async fn test_update_validation() {
    let repo = funded_repo(1000).await;
    let receipt = services::record_expenses(
        &repo,
        day(2024, 3, 5),
        &[draft("Bread", 100, "Wife A", ExpenseCategory::Breakfast)],
    )
    .await
    .unwrap();
    let id = receipt.expenses[0].id.clone();

    let err = services::update_expense(&repo, &id, &ExpenseUpdate::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Nothing to update"));

    let bad_price = ExpenseUpdate {
        price: Some(0),
        ..Default::default()
    };
    let err = services::update_expense(&repo, &id, &bad_price)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Price must be positive"));

    let valid = ExpenseUpdate {
        price: Some(250),
        ..Default::default()
    };
    let err = services::update_expense(&repo, &ExpenseId::new("missing"), &valid)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[tokio::test]
async fn test_add_funds_requires_positive_amount() {
    let repo = LocalRepository::new();
    for amount in [0, -500] {
        let err = services::add_funds(&repo, amount).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));
    }
    assert_eq!(services::current_balance(&repo).await.unwrap(), 0);
}

// =========================================================
// Month filtering
// =========================================================

#[tokio::test]
async fn test_expenses_for_month_filters_by_calendar_month() {
    let repo = funded_repo(10_000).await;
    services::record_expenses(
        &repo,
        day(2024, 3, 5),
        &[draft("March bread", 100, "Wife A", ExpenseCategory::Breakfast)],
    )
    .await
    .unwrap();
    services::record_expenses(
        &repo,
        day(2024, 4, 1),
        &[draft("April rice", 200, "Wife B", ExpenseCategory::Lunch)],
    )
    .await
    .unwrap();

    let march = services::expenses_for_month(&repo, 2024, 3).await.unwrap();
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].item, "March bread");

    let may = services::expenses_for_month(&repo, 2024, 5).await.unwrap();
    assert!(may.is_empty());

    let err = services::expenses_for_month(&repo, 2024, 13)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

// =========================================================
// Roster management
// =========================================================

#[tokio::test]
async fn test_sentinel_cannot_join_roster() {
    let repo = LocalRepository::new();
    let err = services::set_roster(&repo, &[Participant::unassigned()])
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
    // The default roster is still in place.
    assert_eq!(services::get_roster(&repo).await.unwrap(), trio());
}

#[tokio::test]
async fn test_toggle_removes_then_reappends_at_end() {
    let repo = LocalRepository::new();
    let wife_a = Participant::new("Wife A");

    let roster = services::toggle_participant(&repo, &wife_a).await.unwrap();
    assert_eq!(
        roster,
        vec![Participant::new("Wife B"), Participant::new("Wife C")]
    );

    let roster = services::toggle_participant(&repo, &wife_a).await.unwrap();
    assert_eq!(
        roster,
        vec![
            Participant::new("Wife B"),
            Participant::new("Wife C"),
            Participant::new("Wife A"),
        ]
    );
}

#[tokio::test]
async fn test_move_participant_swaps_neighbours() {
    let repo = LocalRepository::new();
    let wife_c = Participant::new("Wife C");

    let roster = services::move_participant(&repo, &wife_c, MoveDirection::Up)
        .await
        .unwrap();
    assert_eq!(
        roster,
        vec![
            Participant::new("Wife A"),
            Participant::new("Wife C"),
            Participant::new("Wife B"),
        ]
    );

    // Moving the first participant up is a no-op.
    let wife_a = Participant::new("Wife A");
    let unchanged = services::move_participant(&repo, &wife_a, MoveDirection::Up)
        .await
        .unwrap();
    assert_eq!(unchanged, roster);

    let err = services::move_participant(&repo, &Participant::new("Stranger"), MoveDirection::Down)
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

// =========================================================
// Duty board
// =========================================================

#[tokio::test]
async fn test_duty_board_uses_persisted_roster() {
    let repo = LocalRepository::new();
    let calc = DutyCalculator::new(RotationPolicy::RoundRobin, day(2024, 1, 1));

    // Default roster: day 1 after the anchor belongs to Wife B.
    let result = duty_board::duty_for_day(&repo, &calc, day(2024, 1, 2))
        .await
        .unwrap();
    assert_eq!(result.primary, Some(Participant::new("Wife B")));

    // Shrinking the roster re-routes the same date.
    services::set_roster(&repo, &[Participant::new("Wife C")])
        .await
        .unwrap();
    let result = duty_board::duty_for_day(&repo, &calc, day(2024, 1, 2))
        .await
        .unwrap();
    assert_eq!(result.primary, Some(Participant::new("Wife C")));

    // An emptied roster means nobody is on duty.
    services::set_roster(&repo, &[]).await.unwrap();
    let result = duty_board::duty_for_day(&repo, &calc, day(2024, 1, 2))
        .await
        .unwrap();
    assert!(result.primary.is_none());
    assert!(result.assignments.is_empty());
}

// =========================================================
// Dashboard & suggestions over stored data
// =========================================================

#[tokio::test]
async fn test_dashboard_over_stored_month() {
    let repo = funded_repo(100_000).await;
    services::record_expenses(
        &repo,
        day(2024, 3, 1),
        &[
            draft("Rice", 3000, "Wife A", ExpenseCategory::Lunch),
            draft("Bread", 800, "Wife B", ExpenseCategory::Breakfast),
        ],
    )
    .await
    .unwrap();
    services::record_expenses(
        &repo,
        day(2024, 3, 2),
        &[draft("Bread", 900, "Wife B", ExpenseCategory::Breakfast)],
    )
    .await
    .unwrap();

    let march = services::expenses_for_month(&repo, 2024, 3).await.unwrap();
    let data = compute_dashboard(&march, &trio());

    assert_eq!(data.total_spend, 4700);
    assert_eq!(data.spend_per_participant[0].total, 3000);
    assert_eq!(data.spend_per_participant[1].total, 1700);
    assert_eq!(data.most_expensive_item.unwrap().item, "Rice");
    let frequent = data.most_frequent_item.unwrap();
    assert_eq!(frequent.item, "Bread");
    assert_eq!(frequent.count, 2);
}

#[tokio::test]
async fn test_suggestions_from_stored_history() {
    let repo = funded_repo(100_000).await;
    services::record_expenses(
        &repo,
        day(2024, 3, 1),
        &[
            draft("Bread", 800, "Wife A", ExpenseCategory::Breakfast),
            draft("Bread", 1000, "Wife B", ExpenseCategory::Breakfast),
        ],
    )
    .await
    .unwrap();

    let history = services::list_expenses(&repo).await.unwrap();
    let suggester = HistorySuggester::new();

    let suggestion = suggester.suggest("bread", &history).await.unwrap();
    assert_eq!(suggestion.category, Some(ExpenseCategory::Breakfast));
    assert_eq!(suggestion.price, Some(900));

    let suggestion = suggester.suggest("Caviar", &history).await.unwrap();
    assert!(suggestion.is_none());
}
