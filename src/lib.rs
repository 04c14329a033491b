//! Rust Bank Ledger Library
//! # Overview
//!
//! This library keeps an in-memory ledger of accounts with exact decimal
//! balances, supports deposits, withdrawals and atomic transfers, and persists
//! the ledger to CSV.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, AccountId, LedgerError)
//! - [`core`] - Business logic components:
//!   - [`core::ledger`] - Single-actor ledger
//!   - [`core::concurrent`] - Thread-safe ledger with per-account locking
//!   - [`core::identity`] - Identifier strategies (name, sequential, random)
//! - [`io`] - CSV row schemas and file persistence
//! - [`cli`] - CLI arguments and the interactive shell
//! - [`config`] - Session configuration
//! - [`telemetry`] - Tracing subscriber setup
//!
//! # Invariants
//!
//! - No balance is ever negative
//! - A failed operation leaves every balance unchanged
//! - A transfer moves funds completely or not at all, so the sum of all
//!   balances is preserved
//! - Identifiers are unique within a ledger
//!
//! # Example
//!
//! ```
//! use rust_bank_ledger::{Ledger, LedgerError};
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new();
//! ledger.create_account("A", Decimal::new(10000, 2)).unwrap();
//! ledger.create_account("B", Decimal::new(5000, 2)).unwrap();
//! ledger.transfer("A", "B", Decimal::new(3000, 2)).unwrap();
//!
//! assert_eq!(ledger.get_account("A").unwrap().balance(), Decimal::new(7000, 2));
//! assert!(matches!(
//!     ledger.withdraw("B", Decimal::new(10000, 2)),
//!     Err(LedgerError::InsufficientFunds { .. })
//! ));
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod telemetry;
pub mod types;

pub use config::LedgerConfig;
pub use core::{create_ledger, ConcurrentLedger, IdScheme, Ledger, LedgerKind, LedgerOps, LoadOutcome};
pub use io::{read_accounts_csv, write_accounts_csv, RowSchema};
pub use types::{Account, AccountId, LedgerError};
