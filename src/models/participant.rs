//! Participants and meals.
//!
//! A participant is identified by name. The household historically runs with
//! three named caregivers plus a sentinel "N/A" used to attribute expenses
//! that belong to nobody's meal duty (category `Other`). The sentinel is an
//! attribution value only; it is never a member of the duty roster.

use serde::{Deserialize, Serialize};

/// Name of the sentinel participant used for unattributed expenses.
pub const UNASSIGNED_NAME: &str = "N/A";

/// Default participant names, in default rotation order.
pub const DEFAULT_PARTICIPANT_NAMES: [&str; 3] = ["Wife A", "Wife B", "Wife C"];

/// A rotation participant, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Participant(name.into())
    }

    /// The sentinel participant for expenses outside any meal duty.
    pub fn unassigned() -> Self {
        Participant(UNASSIGNED_NAME.to_string())
    }

    pub fn is_unassigned(&self) -> bool {
        self.0 == UNASSIGNED_NAME
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Participant::new(name)
    }
}

/// The default roster: all three household participants, in order.
pub fn default_roster() -> Vec<Participant> {
    DEFAULT_PARTICIPANT_NAMES
        .iter()
        .map(|name| Participant::new(*name))
        .collect()
}

/// One of the three daily meals, ordered within the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

impl Meal {
    /// All meals in day order.
    pub const ALL: [Meal; 3] = [Meal::Breakfast, Meal::Lunch, Meal::Dinner];
}

impl std::fmt::Display for Meal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Meal::Breakfast => "Breakfast",
            Meal::Lunch => "Lunch",
            Meal::Dinner => "Dinner",
        };
        write!(f, "{}", s)
    }
}
