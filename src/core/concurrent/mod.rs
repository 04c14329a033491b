//! Thread-safe ledger implementation
//!
//! This module contains the ledger variant designed for shared,
//! multi-threaded use:
//!
//! - `ledger` - `ConcurrentLedger`, DashMap-backed with per-account locks

pub mod ledger;

pub use ledger::ConcurrentLedger;
