//! I/O module
//!
//! Handles ledger persistence.
//!
//! # Components
//!
//! - `csv_format` - row schemas, account serialization and validated parsing
//! - `store` - file open/create around the CSV functions

pub mod csv_format;
pub mod store;

pub use csv_format::{read_accounts_csv, write_accounts_csv, RowSchema};
pub use store::{load_accounts, save_accounts};
