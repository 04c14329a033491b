//! Types module
//!
//! Contains core data structures used throughout the ledger:
//! - `account`: the Account entity and its persistence row
//! - `id`: the AccountId key type
//! - `error`: error types for the ledger

pub mod account;
pub mod error;
pub mod id;

pub use account::{Account, AccountRow};
pub use error::LedgerError;
pub use id::AccountId;
