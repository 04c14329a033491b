//! Core business logic module
//!
//! This module contains the ledger components:
//! - `traits` - the `LedgerOps` operation surface shared by both ledgers
//! - `identity` - identifier strategies and the `IdScheme` selector
//! - `ledger` - single-actor `Ledger`
//! - `concurrent` - thread-safe `ConcurrentLedger`

pub mod concurrent;
pub mod identity;
pub mod ledger;
pub mod traits;

pub use concurrent::ConcurrentLedger;
pub use identity::{IdScheme, IdStrategy, NameIds, RandomIds, SequentialIds};
pub use ledger::Ledger;
pub use traits::{LedgerOps, LoadOutcome};

use clap::ValueEnum;

/// Available ledger implementations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LedgerKind {
    /// Single-actor ledger
    #[default]
    Sync,
    /// Thread-safe ledger with per-account locking
    Concurrent,
}

/// Create a ledger of the given kind
///
/// Both kinds start empty and issue identifiers according to `scheme`.
///
/// # Returns
///
/// A boxed trait object implementing `LedgerOps`
pub fn create_ledger(kind: LedgerKind, scheme: IdScheme) -> Box<dyn LedgerOps> {
    match kind {
        LedgerKind::Sync => Box::new(Ledger::with_scheme(scheme)),
        LedgerKind::Concurrent => Box::new(ConcurrentLedger::with_scheme(scheme)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    fn test_create_ledger_honours_scheme(
        #[values(LedgerKind::Sync, LedgerKind::Concurrent)] kind: LedgerKind,
        #[values(IdScheme::Name, IdScheme::Sequential)] scheme: IdScheme,
    ) {
        let mut ledger = create_ledger(kind, scheme);

        let id = ledger.create_account("Alice", Decimal::TEN).unwrap();

        let expected = match scheme {
            IdScheme::Name => "Alice",
            _ => "acct-1",
        };
        assert_eq!(id.as_str(), expected);
        assert_eq!(ledger.uses_name_as_id(), scheme == IdScheme::Name);
        assert_eq!(ledger.list_accounts().len(), 1);
    }
}
