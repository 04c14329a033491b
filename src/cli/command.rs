//! Shell command grammar
//!
//! Each line typed into the shell is split on whitespace and parsed with
//! clap, so usage errors and `help` output come for free. Amounts are kept
//! as text here and converted by [`parse_amount`], which reports bad input
//! as `InvalidAmount` like every other amount failure.

use crate::types::LedgerError;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// One parsed shell line
#[derive(Parser, Debug)]
#[command(
    name = "ledger",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]..."
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Commands accepted by the shell
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Create an account with an opening balance
    CreateAccount {
        name: String,
        #[arg(allow_hyphen_values = true)]
        initial_balance: String,
    },
    /// Deposit into an account
    Deposit {
        account: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Withdraw from an account
    Withdraw {
        account: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Move funds between two accounts
    Transfer {
        from: String,
        to: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Replace all accounts with the contents of a CSV file
    LoadCsv { file: PathBuf },
    /// Write all accounts to a CSV file
    SaveCsv { file: PathBuf },
    /// List every account and its balance
    #[command(alias = "list")]
    Show,
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

impl ShellLine {
    /// Parse one line of input
    pub fn parse_line(line: &str) -> Result<ShellCommand, clap::Error> {
        ShellLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }
}

/// Parse amount text as an exact decimal
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str_exact(raw).map_err(|_| LedgerError::invalid_amount(raw))
}
