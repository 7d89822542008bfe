//! Duty board orchestration.
//!
//! The only place where the persisted roster meets the pure calculator.
//! Everything here is a thin read-then-compute: the roster comes from the
//! store (seeded with the default trio on first access) and the calculator
//! does the rest.

use chrono::{NaiveDate, NaiveDateTime};
use log::info;

use crate::db::repository::{FullRepository, RepositoryResult};
use crate::duty::DutyCalculator;
use crate::models::duty::DutyResult;

/// Compute the duty picture for the calendar day containing `at`, using the
/// roster currently persisted in the store.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `calculator` - Configured rotation calculator
/// * `at` - Any timestamp; only its calendar day matters
pub async fn duty_for_date<R: FullRepository + ?Sized>(
    repo: &R,
    calculator: &DutyCalculator,
    at: NaiveDateTime,
) -> RepositoryResult<DutyResult> {
    duty_for_day(repo, calculator, at.date()).await
}

/// Compute the duty picture for a calendar day using the persisted roster.
pub async fn duty_for_day<R: FullRepository + ?Sized>(
    repo: &R,
    calculator: &DutyCalculator,
    day: NaiveDate,
) -> RepositoryResult<DutyResult> {
    let roster = repo.roster().await?;
    info!(
        "Service layer: computing duty for {} over {} roster slot(s)",
        day,
        roster.len()
    );
    Ok(calculator.compute_duty_on(day, &roster))
}
