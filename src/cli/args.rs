use crate::config::LedgerConfig;
use crate::core::{IdScheme, LedgerKind};
use clap::Parser;
use std::path::PathBuf;

/// Interactive ledger of named accounts with CSV persistence
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Interactive ledger of named accounts with CSV persistence", long_about = None)]
pub struct CliArgs {
    /// Ledger file loaded at startup
    #[arg(
        long = "file",
        short = 'f',
        value_name = "PATH",
        help = "Ledger CSV file to load at startup (a missing file starts empty)"
    )]
    pub file: Option<PathBuf>,

    /// Save back to the ledger file on exit
    #[arg(long = "autosave", help = "Save the ledger to --file when the session ends")]
    pub autosave: bool,

    /// How account identifiers are issued
    #[arg(
        long = "id-scheme",
        value_name = "SCHEME",
        default_value = "name",
        help = "Identifier scheme: 'name', 'sequential' or 'random'"
    )]
    pub id_scheme: IdScheme,

    /// Ledger implementation
    #[arg(
        long = "engine",
        value_name = "ENGINE",
        default_value = "sync",
        help = "Ledger implementation: 'sync' or 'concurrent'"
    )]
    pub engine: LedgerKind,

    /// Log filter used when RUST_LOG is not set
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level or filter directive (overridden by RUST_LOG)"
    )]
    pub log_level: String,
}

impl CliArgs {
    /// Create a LedgerConfig from CLI arguments
    pub fn to_ledger_config(&self) -> LedgerConfig {
        LedgerConfig::new(
            self.engine,
            self.id_scheme,
            self.file.clone(),
            self.autosave,
        )
    }
}
