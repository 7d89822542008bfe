#![allow(dead_code)]

use chrono::NaiveDate;

use hearth_rust::api::{ExpenseCategory, ExpenseDraft};
use hearth_rust::models::participant::Participant;

/// Calendar day shorthand for fixtures.
pub fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).expect("valid test date")
}

/// A meal-category expense draft attributed to a named participant.
pub fn draft(item: &str, price: i64, participant: &str, category: ExpenseCategory) -> ExpenseDraft {
    ExpenseDraft {
        item: item.to_string(),
        price,
        participant: Participant::new(participant),
        category,
    }
}

/// An `Other`-category draft attributed to the unassigned sentinel.
pub fn other_draft(item: &str, price: i64) -> ExpenseDraft {
    ExpenseDraft {
        item: item.to_string(),
        price,
        participant: Participant::unassigned(),
        category: ExpenseCategory::Other,
    }
}

/// The default household trio, in rotation order.
pub fn trio() -> Vec<Participant> {
    vec![
        Participant::new("Wife A"),
        Participant::new("Wife B"),
        Participant::new("Wife C"),
    ]
}
