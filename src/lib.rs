//! Expense Tracker - terminal personal expense and budget tracker
//!
//! This library provides the core functionality for the `expense` CLI: a
//! list of income/expense entries, a monthly budget with optional
//! per-category limits, and statistics for the current month derived from
//! both.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, money, categories, state)
//! - `storage`: Durable record of the state, behind a backend trait
//! - `clock`: Injectable time source
//! - `services`: The expense store, statistics and filtering
//! - `audit`: Audit logging system
//! - `cli`: Command handlers for the binary
//! - `display`: Terminal formatting
//!
//! # Example
//!
//! ```rust
//! use expense_tracker::clock::FixedClock;
//! use expense_tracker::models::{ExpensePayload, Money};
//! use expense_tracker::services::ExpenseStore;
//! use expense_tracker::storage::MemoryBackend;
//!
//! let clock = FixedClock::on(2025, 3, 15).unwrap();
//! let mut store = ExpenseStore::open(MemoryBackend::new(), clock);
//!
//! store.add_expense(ExpensePayload::new("Coffee", "4.50"));
//! assert_eq!(store.stats().spending, Money::from_cents(450));
//! ```

pub mod audit;
pub mod cli;
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
