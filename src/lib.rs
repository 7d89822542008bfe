//! # Hearth Rust Backend
//!
//! Shared-expense and meal-duty backend for a small household.
//!
//! This crate provides the Rust backend for the Hearth household tracker:
//! expense logging against a shared balance, an ordered duty roster, a pure
//! meal-duty rotation calculator, and item-detail suggestions derived from
//! expense history. The backend exposes a REST API via Axum.
//!
//! ## Features
//!
//! - **Expense Ledger**: record, update and delete expense batches with
//!   transactional balance bookkeeping
//! - **Duty Rotation**: deterministic calculation of which participant covers
//!   which meals on any calendar date
//! - **Roster Management**: ordered, mutable participant roster driving the
//!   rotation
//! - **Suggestions**: category and price guesses for new items, backed by a
//!   pluggable provider
//! - **HTTP API**: RESTful endpoints for the frontend
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: identifier newtypes and the consolidated DTO surface
//! - [`models`]: domain types (participants, meals, expenses, duty results)
//! - [`duty`]: the pure rotation calculator
//! - [`db`]: repository pattern over the household document store
//! - [`services`]: business logic (dashboard, duty board, suggestions)
//! - [`http`]: Axum-based HTTP server and request handlers

// Allow large error types - RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;

pub mod db;
pub mod duty;
pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
