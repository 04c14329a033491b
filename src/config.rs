//! Runtime configuration
//!
//! `LedgerConfig` gathers everything needed to start a ledger session: which
//! ledger implementation to use, how identifiers are issued, and which file
//! (if any) backs the ledger.

use crate::core::{IdScheme, LedgerKind};
use std::path::PathBuf;
use tracing::warn;

/// Configuration for a ledger session
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Ledger implementation
    pub kind: LedgerKind,
    /// Identity scheme; also decides the file's row layout
    pub id_scheme: IdScheme,
    /// File loaded at startup (a missing file starts an empty ledger)
    pub data_file: Option<PathBuf>,
    /// Save back to `data_file` when the session ends
    pub autosave: bool,
}

impl LedgerConfig {
    /// Create a LedgerConfig with custom values
    ///
    /// Autosave needs a data file; without one it is switched off with a
    /// warning.
    pub fn new(
        kind: LedgerKind,
        id_scheme: IdScheme,
        data_file: Option<PathBuf>,
        autosave: bool,
    ) -> Self {
        let autosave = if autosave && data_file.is_none() {
            warn!("autosave requested without a data file, ignoring");
            false
        } else {
            autosave
        };

        Self {
            kind,
            id_scheme,
            data_file,
            autosave,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert_eq!(config.kind, LedgerKind::Sync);
        assert_eq!(config.id_scheme, IdScheme::Name);
        assert_eq!(config.data_file, None);
        assert!(!config.autosave);
    }

    #[rstest]
    #[case::with_file(Some(PathBuf::from("ledger.csv")), true, true)]
    #[case::without_file(None, true, false)]
    #[case::not_requested(Some(PathBuf::from("ledger.csv")), false, false)]
    fn test_autosave_requires_data_file(
        #[case] data_file: Option<PathBuf>,
        #[case] requested: bool,
        #[case] expected: bool,
    ) {
        let config = LedgerConfig::new(LedgerKind::Sync, IdScheme::Name, data_file, requested);
        assert_eq!(config.autosave, expected);
    }
}
