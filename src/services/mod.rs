//! Service layer for business logic and orchestration.
//!
//! This module contains the services that sit between the store operations
//! and the HTTP layer. Services orchestrate repository calls and implement
//! business logic and data processing.

pub mod dashboard;

pub mod duty_board;

pub mod suggestion;

pub use dashboard::{compute_dashboard, DashboardData};
pub use duty_board::{duty_for_date, duty_for_day};
pub use suggestion::{HistorySuggester, ItemSuggestion, SuggestionProvider};
