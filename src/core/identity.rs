//! Account identifier strategies
//!
//! A ledger never decides on its own how accounts are keyed; it asks an
//! [`IdStrategy`]. Two schemes exist:
//!
//! - **Name as identifier** ([`NameIds`]): the name the caller chose is the
//!   key, so names must be unique. Persisted as `name,balance`.
//! - **Generated identifier** ([`SequentialIds`], [`RandomIds`]): an opaque
//!   token is issued at creation and the name is only a label. Persisted as
//!   `account_id,name,balance`.
//!
//! A ledger uses exactly one scheme for its whole lifetime.

use crate::io::csv_format::RowSchema;
use crate::types::{AccountId, LedgerError};
use clap::ValueEnum;
use std::fmt;
use uuid::Uuid;

/// Issues identifiers for newly created accounts
pub trait IdStrategy: Send + fmt::Debug {
    /// Produce the identifier for a new account called `name`
    ///
    /// # Errors
    ///
    /// `ArithmeticOverflow` if a generator has no identifier left to issue
    fn next_id(&mut self, name: &str) -> Result<AccountId, LedgerError>;

    /// Whether identifiers are the account names themselves
    fn uses_name_as_id(&self) -> bool {
        false
    }

    /// Record an identifier that entered the ledger from a file
    ///
    /// Generators use this to avoid issuing an identifier that is already
    /// taken by a loaded account.
    fn observe(&mut self, _id: &AccountId) {}
}

/// Identifier is the account name (names must be unique)
#[derive(Debug, Default, Clone, Copy)]
pub struct NameIds;

impl IdStrategy for NameIds {
    fn next_id(&mut self, name: &str) -> Result<AccountId, LedgerError> {
        Ok(AccountId::from(name))
    }

    fn uses_name_as_id(&self) -> bool {
        true
    }
}

const SEQUENTIAL_PREFIX: &str = "acct-";

/// Counter-based identifiers: `acct-1`, `acct-2`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    last: u64,
}

impl IdStrategy for SequentialIds {
    fn next_id(&mut self, _name: &str) -> Result<AccountId, LedgerError> {
        let next = self.last.checked_add(1).ok_or_else(|| {
            let last = AccountId::new(format!("{}{}", SEQUENTIAL_PREFIX, self.last));
            LedgerError::arithmetic_overflow("identifier generation", &last)
        })?;
        self.last = next;
        Ok(AccountId::new(format!("{}{}", SEQUENTIAL_PREFIX, next)))
    }

    fn observe(&mut self, id: &AccountId) {
        let issued = id
            .as_str()
            .strip_prefix(SEQUENTIAL_PREFIX)
            .and_then(|n| n.parse::<u64>().ok());

        if let Some(n) = issued {
            self.last = self.last.max(n);
        }
    }
}

/// Random UUID v4 identifiers
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdStrategy for RandomIds {
    fn next_id(&mut self, _name: &str) -> Result<AccountId, LedgerError> {
        Ok(AccountId::new(Uuid::new_v4().to_string()))
    }
}

/// Identity scheme selectable from configuration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum IdScheme {
    /// The account name is its identifier
    #[default]
    Name,
    /// Generated `acct-N` identifiers
    Sequential,
    /// Generated UUID v4 identifiers
    Random,
}

impl IdScheme {
    pub fn build(self) -> Box<dyn IdStrategy> {
        match self {
            IdScheme::Name => Box::new(NameIds),
            IdScheme::Sequential => Box::new(SequentialIds::default()),
            IdScheme::Random => Box::new(RandomIds),
        }
    }

    pub fn schema(self) -> RowSchema {
        match self {
            IdScheme::Name => RowSchema::Named,
            IdScheme::Sequential | IdScheme::Random => RowSchema::Keyed,
        }
    }
}
