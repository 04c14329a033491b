//! Core trait for ledger operations
//!
//! This module defines the operation surface shared by the single-actor
//! [`Ledger`](crate::core::Ledger) and the thread-safe
//! [`ConcurrentLedger`](crate::core::ConcurrentLedger), so callers such as
//! the shell can drive either one.

use crate::types::{Account, AccountId, LedgerError};
use rust_decimal::Decimal;
use std::path::Path;

/// Result of loading a ledger file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file existed and replaced the ledger contents
    Loaded {
        /// Number of accounts now in the ledger
        accounts: usize,
    },
    /// No file exists at the path; the ledger was left untouched
    Missing,
}

/// Operations on an identity-keyed collection of accounts
///
/// Every method reports a specific [`LedgerError`] kind on failure and
/// leaves the ledger unchanged when it fails.
pub trait LedgerOps: Send {
    /// Create an account and return its identifier
    fn create_account(
        &mut self,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<AccountId, LedgerError>;

    /// Snapshot of one account
    fn account(&self, id: &str) -> Result<Account, LedgerError>;

    /// Credit `amount` to an account
    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Debit `amount` from an account
    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Move `amount` between two accounts, all or nothing
    fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError>;

    /// Snapshot of every account, sorted by identifier
    fn list_accounts(&self) -> Vec<Account>;

    /// Whether account names double as identifiers
    fn uses_name_as_id(&self) -> bool;

    /// Write every account to the file at `path`
    fn save_to_file(&self, path: &Path) -> Result<(), LedgerError>;

    /// Replace all accounts with the contents of the file at `path`
    fn load_from_file(&mut self, path: &Path) -> Result<LoadOutcome, LedgerError>;
}
