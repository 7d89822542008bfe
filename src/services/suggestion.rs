//! Item detail suggestions.
//!
//! When a new item is typed into the expense form, the application proposes
//! a category and a price. The provider behind that proposal is opaque to
//! the rest of the system: it sees the item name and the expense history and
//! answers with a nullable pair. A generative backend can implement
//! [`SuggestionProvider`]; the default [`HistorySuggester`] derives the same
//! answer deterministically from the history alone.
//!
//! Suggestions are advisory text-field prefills only. Duty scheduling never
//! goes through this seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::{Expense, ExpenseCategory};

/// A proposed category and price for a new item. Either side may be absent
/// when the provider has nothing to offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSuggestion {
    pub category: Option<ExpenseCategory>,
    pub price: Option<i64>,
}

impl ItemSuggestion {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_none(&self) -> bool {
        self.category.is_none() && self.price.is_none()
    }
}

/// A source of item detail suggestions.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Propose a category and price for `item_name` given the expense
    /// history. Returns the empty suggestion rather than erroring when
    /// nothing sensible can be proposed.
    async fn suggest(
        &self,
        item_name: &str,
        history: &[Expense],
    ) -> anyhow::Result<ItemSuggestion>;
}

/// Deterministic suggestion provider backed by the expense history.
///
/// Finds past expenses with a matching item name (case-insensitive exact
/// match first, substring match as a fallback), then proposes the most
/// common category among them and their rounded mean price.
#[derive(Debug, Clone, Default)]
pub struct HistorySuggester;

impl HistorySuggester {
    pub fn new() -> Self {
        Self
    }

    fn matches<'a>(item_name: &str, history: &'a [Expense]) -> Vec<&'a Expense> {
        let query = item_name.trim().to_lowercase();

        let exact: Vec<&Expense> = history
            .iter()
            .filter(|e| e.item.to_lowercase() == query)
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        history
            .iter()
            .filter(|e| {
                let name = e.item.to_lowercase();
                name.contains(&query) || query.contains(&name)
            })
            .collect()
    }

    fn modal_category(matches: &[&Expense]) -> Option<ExpenseCategory> {
        let mut counts: HashMap<ExpenseCategory, usize> = HashMap::new();
        for expense in matches {
            *counts.entry(expense.category).or_insert(0) += 1;
        }
        // Tie-break on day order so the answer is stable.
        ExpenseCategory::ALL
            .iter()
            .copied()
            .filter(|c| counts.contains_key(c))
            .max_by_key(|c| counts[c])
    }

    fn mean_price(matches: &[&Expense]) -> Option<i64> {
        if matches.is_empty() {
            return None;
        }
        let sum: i64 = matches.iter().map(|e| e.price).sum();
        Some((sum as f64 / matches.len() as f64).round() as i64)
    }
}

#[async_trait]
impl SuggestionProvider for HistorySuggester {
    async fn suggest(
        &self,
        item_name: &str,
        history: &[Expense],
    ) -> anyhow::Result<ItemSuggestion> {
        if item_name.trim().is_empty() {
            return Ok(ItemSuggestion::none());
        }

        let matches = Self::matches(item_name, history);
        if matches.is_empty() {
            return Ok(ItemSuggestion::none());
        }

        Ok(ItemSuggestion {
            category: Self::modal_category(&matches),
            price: Self::mean_price(&matches),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ExpenseId;
    use crate::models::participant::Participant;
    use chrono::NaiveDate;

    fn expense(item: &str, price: i64, category: ExpenseCategory) -> Expense {
        Expense {
            id: ExpenseId::generate(),
            item: item.to_string(),
            price,
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            participant: Participant::new("Wife A"),
            category,
        }
    }

    #[tokio::test]
    async fn test_no_history_means_no_suggestion() {
        let suggestion = HistorySuggester::new().suggest("Bread", &[]).await.unwrap();
        assert!(suggestion.is_none());
    }

    #[tokio::test]
    async fn test_exact_match_wins_over_substring() {
        let history = vec![
            expense("Bread", 800, ExpenseCategory::Breakfast),
            expense("Bread rolls", 2000, ExpenseCategory::Other),
        ];
        let suggestion = HistorySuggester::new()
            .suggest("bread", &history)
            .await
            .unwrap();
        assert_eq!(suggestion.category, Some(ExpenseCategory::Breakfast));
        assert_eq!(suggestion.price, Some(800));
    }

    #[tokio::test]
    async fn test_modal_category_and_mean_price() {
        let history = vec![
            expense("Rice", 3000, ExpenseCategory::Lunch),
            expense("Rice", 3500, ExpenseCategory::Lunch),
            expense("Rice", 2000, ExpenseCategory::Dinner),
        ];
        let suggestion = HistorySuggester::new()
            .suggest("Rice", &history)
            .await
            .unwrap();
        assert_eq!(suggestion.category, Some(ExpenseCategory::Lunch));
        // (3000 + 3500 + 2000) / 3 rounds to 2833
        assert_eq!(suggestion.price, Some(2833));
    }

    #[tokio::test]
    async fn test_substring_fallback() {
        let history = vec![expense("Fresh bread", 900, ExpenseCategory::Breakfast)];
        let suggestion = HistorySuggester::new()
            .suggest("bread", &history)
            .await
            .unwrap();
        assert_eq!(suggestion.price, Some(900));
    }
}
