//! Single-actor ledger
//!
//! This module provides the `Ledger` struct which owns every account and
//! all mutation logic, plus the import/export mapping to the CSV format.
//!
//! The Ledger is responsible for:
//! - Creating accounts under identifiers issued by its `IdStrategy`
//! - Deposits, withdrawals and all-or-nothing transfers
//! - Saving to and loading from ledger files
//!
//! It is not synchronized; see `ConcurrentLedger` for shared use.

use crate::core::identity::{IdScheme, IdStrategy};
use crate::core::traits::{LedgerOps, LoadOutcome};
use crate::io::csv_format::{read_accounts_csv, write_accounts_csv, RowSchema};
use crate::io::store::{load_accounts, save_accounts};
use crate::types::{Account, AccountId, LedgerError};
use rust_decimal::Decimal;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info, warn};

/// In-memory ledger of accounts keyed by identifier
///
/// The map is the single source of truth; aggregates such as
/// [`total_balance`](Ledger::total_balance) are computed on demand.
#[derive(Debug)]
pub struct Ledger {
    accounts: HashMap<AccountId, Account>,
    ids: Box<dyn IdStrategy>,
}

impl Ledger {
    /// Create an empty ledger keyed by account name
    pub fn new() -> Self {
        Self::with_scheme(IdScheme::default())
    }

    pub fn with_scheme(scheme: IdScheme) -> Self {
        Self::with_strategy(scheme.build())
    }

    /// Create an empty ledger that takes identifiers from `ids`
    pub fn with_strategy(ids: Box<dyn IdStrategy>) -> Self {
        Ledger {
            accounts: HashMap::new(),
            ids,
        }
    }

    /// Row layout used for this ledger's files
    pub fn schema(&self) -> RowSchema {
        if self.ids.uses_name_as_id() {
            RowSchema::Named
        } else {
            RowSchema::Keyed
        }
    }

    /// Create a new account
    ///
    /// # Arguments
    ///
    /// * `name` - Account name (also the identifier under the name scheme)
    /// * `initial_balance` - Opening balance, zero or more
    ///
    /// # Returns
    ///
    /// The identifier the account was stored under
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `initial_balance` is negative
    /// - `DuplicateIdentifier` if the identifier is already taken
    pub fn create_account(
        &mut self,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<AccountId, LedgerError> {
        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(initial_balance));
        }

        let id = self.ids.next_id(name)?;

        match self.accounts.entry(id) {
            Entry::Occupied(entry) => Err(LedgerError::duplicate_identifier(entry.key())),
            Entry::Vacant(entry) => {
                let id = entry.key().clone();
                entry.insert(Account::new(id.clone(), name, initial_balance));
                debug!(account = %id, balance = %initial_balance, "account created");
                Ok(id)
            }
        }
    }

    /// Look up an account
    ///
    /// The returned reference is read-only; balances change only through
    /// the ledger's operations.
    pub fn get_account(&self, id: &str) -> Result<&Account, LedgerError> {
        self.accounts
            .get(id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    fn get_account_mut(&mut self, id: &str) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(id)
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    pub fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        let account = self.get_account_mut(id)?;
        account.deposit(amount)?;
        debug!(account = id, %amount, balance = %account.balance(), "deposit applied");
        Ok(())
    }

    pub fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        let account = self.get_account_mut(id)?;
        account.withdraw(amount)?;
        debug!(account = id, %amount, balance = %account.balance(), "withdrawal applied");
        Ok(())
    }

    /// Transfer funds between two accounts
    ///
    /// Checks run in this order: same account, amount, source exists,
    /// destination exists, then funds and overflow. Nothing changes unless
    /// every check passes.
    ///
    /// # Errors
    ///
    /// - `SameAccount` if `from == to`
    /// - `InvalidAmount` if `amount <= 0`
    /// - `AccountNotFound` if either account is absent
    /// - `InsufficientFunds` if the source balance is below `amount`
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::same_account(from));
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }
        self.get_account(from)?;
        self.get_account(to)?;

        // Take the source out so both accounts can be borrowed mutably.
        // It goes back in whatever the outcome.
        let mut source = self
            .accounts
            .remove(from)
            .ok_or_else(|| LedgerError::account_not_found(from))?;
        let result = match self.accounts.get_mut(to) {
            Some(destination) => Account::move_funds(&mut source, destination, amount),
            None => Err(LedgerError::account_not_found(to)),
        };
        self.accounts.insert(source.id().clone(), source);

        if result.is_ok() {
            debug!(from, to, %amount, "transfer applied");
        }
        result
    }

    /// All accounts, sorted by identifier
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of every balance
    pub fn total_balance(&self) -> Decimal {
        self.accounts.values().map(Account::balance).sum()
    }

    /// Export every account as CSV to `output`
    pub fn write_csv(&self, output: &mut dyn Write) -> Result<(), LedgerError> {
        write_accounts_csv(self.accounts.values(), self.schema(), output)
    }

    /// Replace all accounts with the CSV rows read from `input`
    ///
    /// Every row is validated before the current accounts are touched.
    ///
    /// # Returns
    ///
    /// The number of accounts loaded
    pub fn read_csv<R: Read>(&mut self, input: R) -> Result<usize, LedgerError> {
        let accounts = read_accounts_csv(input, self.schema())?;
        Ok(self.install(accounts))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), LedgerError> {
        save_accounts(path, self.accounts.values(), self.schema())?;
        info!(path = %path.display(), accounts = self.len(), "ledger saved");
        Ok(())
    }

    /// Replace all accounts with the contents of a ledger file
    ///
    /// A missing file is not an error: the ledger is left untouched and
    /// `LoadOutcome::Missing` is returned. Any invalid row aborts the load
    /// before the current accounts are cleared.
    pub fn load_from_file(&mut self, path: &Path) -> Result<LoadOutcome, LedgerError> {
        match load_accounts(path, self.schema()) {
            Ok(Some(accounts)) => {
                let count = self.install(accounts);
                info!(path = %path.display(), accounts = count, "ledger loaded");
                Ok(LoadOutcome::Loaded { accounts: count })
            }
            Ok(None) => {
                info!(path = %path.display(), "ledger file not found, nothing loaded");
                Ok(LoadOutcome::Missing)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ledger load rejected");
                Err(e)
            }
        }
    }

    fn install(&mut self, accounts: Vec<Account>) -> usize {
        self.accounts.clear();
        for account in accounts {
            self.ids.observe(account.id());
            self.accounts.insert(account.id().clone(), account);
        }
        self.accounts.len()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerOps for Ledger {
    fn create_account(
        &mut self,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<AccountId, LedgerError> {
        Ledger::create_account(self, name, initial_balance)
    }

    fn account(&self, id: &str) -> Result<Account, LedgerError> {
        self.get_account(id).cloned()
    }

    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        Ledger::deposit(self, id, amount)
    }

    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        Ledger::withdraw(self, id, amount)
    }

    fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        Ledger::transfer(self, from, to, amount)
    }

    fn list_accounts(&self) -> Vec<Account> {
        self.accounts().into_iter().cloned().collect()
    }

    fn uses_name_as_id(&self) -> bool {
        self.schema() == RowSchema::Named
    }

    fn save_to_file(&self, path: &Path) -> Result<(), LedgerError> {
        Ledger::save_to_file(self, path)
    }

    fn load_from_file(&mut self, path: &Path) -> Result<LoadOutcome, LedgerError> {
        Ledger::load_from_file(self, path)
    }
}
