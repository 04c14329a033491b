//! Error types for the ledger
//!
//! This module defines every failure a ledger operation can report.
//! Each kind is specific so the calling layer (the shell, or a test) can
//! branch on it instead of matching message text.
//!
//! # Error Categories
//!
//! - **Caller input**: invalid amounts, unknown or duplicate identifiers,
//!   self-transfers, insufficient funds
//! - **Persistence**: malformed rows, unreadable or unwritable files
//! - **Arithmetic**: a balance leaving the decimal range

use super::id::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the ledger
///
/// None of these is fatal to the process. The core never retries: every
/// variant describes a problem with the caller's input or environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// An amount was zero, negative, or not a valid decimal
    ///
    /// Raised by deposit, withdrawal, transfer, and by account creation when
    /// the initial balance is negative.
    #[error("Invalid amount '{amount}': must be a positive decimal")]
    InvalidAmount {
        /// The rejected amount as the caller supplied it
        amount: String,
    },

    /// A withdrawal or transfer source lacked enough balance
    #[error("Insufficient funds in account {account}: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Account that would have gone negative
        account: AccountId,
        /// Balance at the time of the request
        balance: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// An operation referenced an identifier absent from the ledger
    #[error("Account {account} not found")]
    AccountNotFound {
        /// The identifier that was looked up
        account: AccountId,
    },

    /// A transfer named the same account as source and destination
    #[error("Cannot transfer from account {account} to itself")]
    SameAccount {
        /// The identifier used on both sides
        account: AccountId,
    },

    /// A second account would exist under an identifier that must be unique
    ///
    /// Raised by account creation, and by file import when the file itself
    /// repeats an identifier.
    #[error("Duplicate account identifier {account}")]
    DuplicateIdentifier {
        /// The repeated identifier
        account: AccountId,
    },

    /// A persisted row could not be turned into an account
    ///
    /// Covers unparseable or negative balances as well as structural CSV
    /// problems (wrong header, missing fields).
    #[error("Invalid format{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidFormat {
        /// Line number of the offending row (if known)
        line: Option<u64>,
        /// Description of the problem
        message: String,
    },

    /// I/O error while reading or writing a ledger file
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A balance update would leave the representable decimal range
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account being updated
        account: AccountId,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return LedgerError::IoError {
                message: error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        LedgerError::InvalidFormat {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: impl ToString) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: &AccountId, balance: Decimal, requested: Decimal) -> Self {
        LedgerError::InsufficientFunds {
            account: account.clone(),
            balance,
            requested,
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: impl Into<AccountId>) -> Self {
        LedgerError::AccountNotFound {
            account: account.into(),
        }
    }

    /// Create a SameAccount error
    pub fn same_account(account: impl Into<AccountId>) -> Self {
        LedgerError::SameAccount {
            account: account.into(),
        }
    }

    /// Create a DuplicateIdentifier error
    pub fn duplicate_identifier(account: impl Into<AccountId>) -> Self {
        LedgerError::DuplicateIdentifier {
            account: account.into(),
        }
    }

    /// Create an InvalidFormat error
    pub fn invalid_format(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::InvalidFormat {
            line,
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: &AccountId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            account: account.clone(),
        }
    }
}
