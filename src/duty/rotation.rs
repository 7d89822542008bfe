//! Rotation policies and the duty calculator.
//!
//! The calculator maps `(calendar day, ordered roster)` to a [`DutyResult`].
//! All arithmetic is whole-day, anchored at an explicit reference date, so
//! the same inputs produce the same schedule on every call and for dates
//! arbitrarily far in the past or future.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::duty::{DutyAssignment, DutyResult};
use crate::models::participant::{Meal, Participant};

/// Rotation policy selecting which historical schedule shape to compute.
///
/// New dates should use [`RotationPolicy::RoundRobin`]; the other variants
/// exist so schedules produced under earlier policies stay reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationPolicy {
    /// Day-of-week selects the sole participant for the day.
    FixedWeekday,
    /// Three-participant hand-off cycle: a turn spans three days and
    /// overlaps its neighbours by one day on each side (6-day period).
    ThreeWayHandoff,
    /// One owner per day, rotating through the roster in order.
    #[default]
    RoundRobin,
}

impl FromStr for RotationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixed-weekday" | "weekday" => Ok(Self::FixedWeekday),
            "three-way-handoff" | "handoff" => Ok(Self::ThreeWayHandoff),
            "round-robin" | "roundrobin" => Ok(Self::RoundRobin),
            _ => Err(format!("Unknown rotation policy: {}", s)),
        }
    }
}

/// Duty rotation calculator.
///
/// The anchor is the fixed reference date at which the rotation starts from
/// position zero. Changing it re-phases the rotation for all past and future
/// dates, so it is part of the calculator's configuration rather than a
/// hidden constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DutyCalculator {
    anchor: NaiveDate,
    policy: RotationPolicy,
}

impl Default for DutyCalculator {
    fn default() -> Self {
        Self::new(RotationPolicy::default(), default_anchor())
    }
}

/// The reference date the household schedule has always been phased against.
pub fn default_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid calendar date")
}

impl DutyCalculator {
    pub fn new(policy: RotationPolicy, anchor: NaiveDate) -> Self {
        Self { anchor, policy }
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Compute the duty picture for the calendar day containing `at`.
    ///
    /// The time-of-day component is discarded, so any two timestamps on the
    /// same day agree.
    pub fn compute_duty(&self, at: NaiveDateTime, roster: &[Participant]) -> DutyResult {
        self.compute_duty_on(at.date(), roster)
    }

    /// Compute the duty picture for a calendar day.
    ///
    /// An empty roster yields [`DutyResult::empty`]; this is the only
    /// degenerate case and it is not an error. Duplicate roster entries are
    /// distinct rotation slots.
    pub fn compute_duty_on(&self, day: NaiveDate, roster: &[Participant]) -> DutyResult {
        if roster.is_empty() {
            return DutyResult::empty();
        }

        match self.policy {
            RotationPolicy::RoundRobin => self.round_robin(day, roster),
            RotationPolicy::ThreeWayHandoff => {
                // The hand-off choreography is defined for exactly three
                // participants; any other size rotates day-by-day.
                if roster.len() == 3 {
                    self.three_way_handoff(day, roster)
                } else {
                    self.round_robin(day, roster)
                }
            }
            RotationPolicy::FixedWeekday => self.fixed_weekday(day, roster),
        }
    }

    /// Whole days from the anchor to `day` (negative before the anchor).
    fn day_diff(&self, day: NaiveDate) -> i64 {
        day.signed_duration_since(self.anchor).num_days()
    }

    fn round_robin(&self, day: NaiveDate, roster: &[Participant]) -> DutyResult {
        let n = roster.len() as i64;
        let idx = self.day_diff(day).rem_euclid(n) as usize;
        sole_owner(roster[idx].clone())
    }

    fn fixed_weekday(&self, day: NaiveDate, roster: &[Participant]) -> DutyResult {
        let idx = day.weekday().num_days_from_monday() as usize % roster.len();
        sole_owner(roster[idx].clone())
    }

    /// The 6-day hand-off cycle for a roster `[P1, P2, P3]`.
    ///
    /// | cycle day | breakfast+lunch | dinner |
    /// |-----------|-----------------|--------|
    /// | 0         | P3              | P1     |
    /// | 1         | P1              | P1     |
    /// | 2         | P1              | P2     |
    /// | 3         | P2              | P2     |
    /// | 4         | P2              | P3     |
    /// | 5         | P3              | P3     |
    ///
    /// The Lunch holder is the primary participant. On transitioning days
    /// (even cycle days) two participants are active: the one finishing a
    /// turn keeps Breakfast and Lunch while the next one opens with Dinner.
    fn three_way_handoff(&self, day: NaiveDate, roster: &[Participant]) -> DutyResult {
        let cycle_day = self.day_diff(day).rem_euclid(6);

        let (lunch_idx, dinner_idx) = match cycle_day {
            0 => (2, 0),
            1 => (0, 0),
            2 => (0, 1),
            3 => (1, 1),
            4 => (1, 2),
            _ => (2, 2),
        };

        if lunch_idx == dinner_idx {
            return sole_owner(roster[lunch_idx].clone());
        }

        DutyResult {
            primary: Some(roster[lunch_idx].clone()),
            assignments: vec![
                DutyAssignment::new(roster[lunch_idx].clone(), [Meal::Breakfast, Meal::Lunch]),
                DutyAssignment::new(roster[dinner_idx].clone(), [Meal::Dinner]),
            ],
        }
    }
}

/// Single-owner day: one participant covers every meal and is primary.
fn sole_owner(participant: Participant) -> DutyResult {
    DutyResult {
        primary: Some(participant.clone()),
        assignments: vec![DutyAssignment::new(participant, Meal::ALL)],
    }
}
