//! Meal-duty rotation calculator.
//!
//! This module is the deterministic core of the backend: given a calendar
//! date and the ordered roster, it decides who cooks what. It performs no
//! I/O, reads no clock, and holds no state beyond its configuration, so it
//! is safe to call from any context and trivially cheap to call on every
//! date or roster change.
//!
//! Duty must never come from anywhere else. In particular, asking a
//! text-generation service for the schedule is not an acceptable substitute;
//! generative output is reserved for free-text field suggestions
//! (see [`crate::services::suggestion`]).

pub mod rotation;

pub use rotation::{default_anchor, DutyCalculator, RotationPolicy};
