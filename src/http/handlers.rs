//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{
    AddFundsRequest, BalanceResponse, DashboardData, DeleteExpenseResponse, DutyQuery,
    DutyResponse, ExpenseListResponse, HealthResponse, ItemListResponse, ItemSuggestion,
    MonthQuery, RecordExpensesRequest, RecordExpensesResponse, RosterResponse, SetRosterRequest,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{ExpenseId, ExpenseUpdate};
use crate::db::services as db_services;
use crate::models::participant::default_roster;
use crate::services::{dashboard, duty_board};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Expense CRUD
// =============================================================================

/// GET /v1/expenses
///
/// List expenses, optionally restricted to one calendar month via
/// `?year=YYYY&month=M`.
pub async fn list_expenses(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<ExpenseListResponse> {
    let expenses = match (query.year, query.month) {
        (Some(year), Some(month)) => {
            db_services::expenses_for_month(state.repository.as_ref(), year, month).await?
        }
        (None, None) => db_services::list_expenses(state.repository.as_ref()).await?,
        _ => {
            return Err(AppError::BadRequest(
                "Month filter needs both 'year' and 'month'".to_string(),
            ))
        }
    };

    let total = expenses.len();
    Ok(Json(ExpenseListResponse { expenses, total }))
}

/// POST /v1/expenses
///
/// Record a dated batch of expenses. The batch commits atomically against
/// the shared balance; an insufficient balance rejects the whole batch.
pub async fn record_expenses(
    State(state): State<AppState>,
    Json(request): Json<RecordExpensesRequest>,
) -> Result<(StatusCode, Json<RecordExpensesResponse>), AppError> {
    let receipt = db_services::record_expenses(
        state.repository.as_ref(),
        request.date,
        &request.expenses,
    )
    .await?;

    let total: i64 = receipt.expenses.iter().map(|e| e.price).sum();
    Ok((
        StatusCode::CREATED,
        Json(RecordExpensesResponse {
            message: format!("{} deducted from balance", total),
            expenses: receipt.expenses,
            balance: receipt.balance,
        }),
    ))
}

/// GET /v1/expenses/{expense_id}
pub async fn get_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> HandlerResult<crate::api::Expense> {
    let id = ExpenseId::new(expense_id);
    let expense = db_services::get_expense(state.repository.as_ref(), &id).await?;
    Ok(Json(expense))
}

/// PUT /v1/expenses/{expense_id}
///
/// Update an expense; a price change adjusts the shared balance by the
/// difference.
pub async fn update_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
    Json(update): Json<ExpenseUpdate>,
) -> HandlerResult<crate::api::Expense> {
    let id = ExpenseId::new(expense_id);
    let expense = db_services::update_expense(state.repository.as_ref(), &id, &update).await?;
    Ok(Json(expense))
}

/// DELETE /v1/expenses/{expense_id}
///
/// Delete an expense, refunding its price to the shared balance.
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(expense_id): Path<String>,
) -> HandlerResult<DeleteExpenseResponse> {
    let id = ExpenseId::new(expense_id);
    let expense = db_services::get_expense(state.repository.as_ref(), &id).await?;
    let balance = db_services::delete_expense(state.repository.as_ref(), &id).await?;

    Ok(Json(DeleteExpenseResponse {
        balance,
        message: format!("{} returned to balance", expense.price),
    }))
}

// =============================================================================
// Balance
// =============================================================================

/// GET /v1/balance
pub async fn get_balance(State(state): State<AppState>) -> HandlerResult<BalanceResponse> {
    let balance = db_services::current_balance(state.repository.as_ref()).await?;
    Ok(Json(BalanceResponse { balance }))
}

/// POST /v1/balance/deposits
///
/// Add funds to the shared balance.
pub async fn add_funds(
    State(state): State<AppState>,
    Json(request): Json<AddFundsRequest>,
) -> HandlerResult<BalanceResponse> {
    let balance = db_services::add_funds(state.repository.as_ref(), request.amount).await?;
    Ok(Json(BalanceResponse { balance }))
}

// =============================================================================
// Roster
// =============================================================================

/// GET /v1/roster
pub async fn get_roster(State(state): State<AppState>) -> HandlerResult<RosterResponse> {
    let participants = db_services::get_roster(state.repository.as_ref()).await?;
    Ok(Json(RosterResponse { participants }))
}

/// PUT /v1/roster
///
/// Replace the duty roster. Order defines the rotation sequence.
pub async fn set_roster(
    State(state): State<AppState>,
    Json(request): Json<SetRosterRequest>,
) -> HandlerResult<RosterResponse> {
    db_services::set_roster(state.repository.as_ref(), &request.participants).await?;
    Ok(Json(RosterResponse {
        participants: request.participants,
    }))
}

// =============================================================================
// Duty
// =============================================================================

/// GET /v1/duty
///
/// Duty picture for a calendar day (`?date=YYYY-MM-DD`, today when
/// omitted). This is the only place a clock is read; the calculator itself
/// never is.
pub async fn get_duty(
    State(state): State<AppState>,
    Query(query): Query<DutyQuery>,
) -> HandlerResult<DutyResponse> {
    let day = query
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let result = duty_board::duty_for_day(state.repository.as_ref(), &state.calculator, day).await?;

    Ok(Json(DutyResponse {
        date: day,
        primary: result.primary,
        assignments: result.assignments,
    }))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard
///
/// Dashboard statistics, optionally restricted to one calendar month.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> HandlerResult<DashboardData> {
    let expenses = match (query.year, query.month) {
        (Some(year), Some(month)) => {
            db_services::expenses_for_month(state.repository.as_ref(), year, month).await?
        }
        (None, None) => db_services::list_expenses(state.repository.as_ref()).await?,
        _ => {
            return Err(AppError::BadRequest(
                "Month filter needs both 'year' and 'month'".to_string(),
            ))
        }
    };

    // Attribution rows cover the household's closed participant set, not the
    // current roster: opted-out caregivers keep their spending history.
    let data = dashboard::compute_dashboard(&expenses, &default_roster());
    Ok(Json(data))
}

// =============================================================================
// Items & Suggestions
// =============================================================================

/// GET /v1/items
pub async fn list_items(State(state): State<AppState>) -> HandlerResult<ItemListResponse> {
    let items = db_services::list_items(state.repository.as_ref()).await?;
    let total = items.len();
    Ok(Json(ItemListResponse { items, total }))
}

/// POST /v1/suggestions
///
/// Propose a category and price for a new item from the expense history.
pub async fn suggest_item(
    State(state): State<AppState>,
    Json(request): Json<super::dto::SuggestionRequest>,
) -> HandlerResult<ItemSuggestion> {
    let history = db_services::list_expenses(state.repository.as_ref()).await?;
    let suggestion = state
        .suggester
        .suggest(&request.item_name, &history)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(suggestion))
}
