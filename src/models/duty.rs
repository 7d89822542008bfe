//! Duty assignment result types.

use serde::{Deserialize, Serialize};

use super::participant::{Meal, Participant};

/// One participant's meal responsibilities for a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    pub participant: Participant,
    /// Meals covered, in day order.
    pub meals: Vec<Meal>,
}

impl DutyAssignment {
    pub fn new(participant: Participant, meals: impl Into<Vec<Meal>>) -> Self {
        Self {
            participant,
            meals: meals.into(),
        }
    }

    pub fn covers(&self, meal: Meal) -> bool {
        self.meals.contains(&meal)
    }
}

/// The full duty picture for one calendar day.
///
/// For a non-empty roster the assignments cover Breakfast, Lunch and Dinner
/// exactly once each, and `primary` is the Lunch owner. An empty roster
/// yields no primary and no assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyResult {
    pub primary: Option<Participant>,
    pub assignments: Vec<DutyAssignment>,
}

impl DutyResult {
    /// The empty result used for an empty roster.
    pub fn empty() -> Self {
        Self {
            primary: None,
            assignments: Vec::new(),
        }
    }

    /// Find the participant covering a given meal, if any.
    pub fn owner_of(&self, meal: Meal) -> Option<&Participant> {
        self.assignments
            .iter()
            .find(|a| a.covers(meal))
            .map(|a| &a.participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_lookup() {
        let result = DutyResult {
            primary: Some(Participant::new("Wife C")),
            assignments: vec![
                DutyAssignment::new(Participant::new("Wife C"), [Meal::Breakfast, Meal::Lunch]),
                DutyAssignment::new(Participant::new("Wife A"), [Meal::Dinner]),
            ],
        };
        assert_eq!(result.owner_of(Meal::Lunch).unwrap().name(), "Wife C");
        assert_eq!(result.owner_of(Meal::Dinner).unwrap().name(), "Wife A");
    }

    #[test]
    fn test_empty_result() {
        let result = DutyResult::empty();
        assert!(result.primary.is_none());
        assert!(result.assignments.is_empty());
        assert!(result.owner_of(Meal::Breakfast).is_none());
    }
}
