//! File-backed ledger storage
//!
//! Opens and creates ledger files and hands the streams to `csv_format`.
//! A missing file on load is reported as `Ok(None)`, not as an error.

use crate::io::csv_format::{read_accounts_csv, write_accounts_csv, RowSchema};
use crate::types::{Account, LedgerError};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

/// Write accounts to the file at `path`, replacing its contents
pub fn save_accounts<'a, I>(path: &Path, accounts: I, schema: RowSchema) -> Result<(), LedgerError>
where
    I: IntoIterator<Item = &'a Account>,
{
    let file = File::create(path).map_err(|e| LedgerError::IoError {
        message: format!("Failed to create file '{}': {}", path.display(), e),
    })?;

    let mut writer = BufWriter::new(file);
    write_accounts_csv(accounts, schema, &mut writer)?;
    writer.flush()?;

    Ok(())
}

/// Read and validate every account in the file at `path`
///
/// # Returns
///
/// * `Ok(Some(accounts))` - every row validated
/// * `Ok(None)` - no file exists at `path`
/// * `Err(LedgerError)` - the file could not be read or a row was invalid
pub fn load_accounts(path: &Path, schema: RowSchema) -> Result<Option<Vec<Account>>, LedgerError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            })
        }
    };

    read_accounts_csv(BufReader::new(file), schema).map(Some)
}
