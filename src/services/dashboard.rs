//! Dashboard statistics over the expense ledger.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::api::Expense;
use crate::models::participant::Participant;

/// An item must appear on at least this many distinct days to count as an
/// "everyday item".
pub const EVERYDAY_ITEM_MIN_DAYS: usize = 20;

/// Spend attributed to one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSpend {
    pub participant: Participant,
    pub total: i64,
}

/// The single most expensive purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopItem {
    pub item: String,
    pub price: i64,
}

/// The most frequently purchased item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequentItem {
    pub item: String,
    pub count: usize,
}

/// Aggregate statistics for a set of expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    pub total_spend: i64,
    pub spend_per_participant: Vec<ParticipantSpend>,
    pub most_expensive_item: Option<TopItem>,
    pub most_frequent_item: Option<FrequentItem>,
    pub everyday_items: Vec<String>,
}

/// Compute dashboard statistics from expenses.
///
/// `participants` fixes which attribution rows appear (and their order);
/// participants without expenses show a zero total. Empty input yields the
/// all-zero dashboard rather than an error.
pub fn compute_dashboard(expenses: &[Expense], participants: &[Participant]) -> DashboardData {
    let total_spend: i64 = expenses.iter().map(|e| e.price).sum();

    let spend_per_participant = participants
        .iter()
        .map(|participant| ParticipantSpend {
            participant: participant.clone(),
            total: expenses
                .iter()
                .filter(|e| &e.participant == participant)
                .map(|e| e.price)
                .sum(),
        })
        .collect();

    let most_expensive_item = expenses
        .iter()
        .max_by(|a, b| a.price.cmp(&b.price).then_with(|| b.item.cmp(&a.item)))
        .map(|e| TopItem {
            item: e.item.clone(),
            price: e.price,
        });

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for expense in expenses {
        *counts.entry(expense.item.as_str()).or_insert(0) += 1;
    }
    let most_frequent_item = counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(item, count)| FrequentItem {
            item: (*item).to_string(),
            count: *count,
        });

    // Items bought on enough distinct days to count as daily staples.
    let mut days_per_item: HashMap<&str, HashSet<chrono::NaiveDate>> = HashMap::new();
    for expense in expenses {
        days_per_item
            .entry(expense.item.as_str())
            .or_default()
            .insert(expense.date);
    }
    let mut everyday_items: Vec<String> = days_per_item
        .into_iter()
        .filter(|(_, days)| days.len() >= EVERYDAY_ITEM_MIN_DAYS)
        .map(|(item, _)| item.to_string())
        .collect();
    everyday_items.sort();

    DashboardData {
        total_spend,
        spend_per_participant,
        most_expensive_item,
        most_frequent_item,
        everyday_items,
    }
}
