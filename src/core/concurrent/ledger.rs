//! Thread-safe ledger
//!
//! This module provides the `ConcurrentLedger` struct, which offers the same
//! operations as `Ledger` through `&self` so one instance can be shared
//! between threads (for example behind an `Arc`).
//!
//! # Design
//!
//! Accounts live in a `DashMap` of `Arc<Mutex<Account>>` handles. An
//! operation clones the handles it needs out of the map first, so no map
//! shard lock is held while an account lock is held.
//!
//! # Locking
//!
//! - deposit/withdraw lock the one account they touch
//! - transfer locks both accounts in ascending identifier order, then runs
//!   the whole check-then-act sequence under both locks, so no reader ever
//!   observes a debit without its matching credit
//! - every single-account operation and every transfer holds the ledger
//!   gate shared; whole-ledger reads (`accounts`, `total_balance`, save)
//!   and load hold it exclusively, so a multi-account snapshot or a
//!   clear-and-replace never interleaves with a transfer

use crate::core::identity::{IdScheme, IdStrategy};
use crate::core::traits::{LedgerOps, LoadOutcome};
use crate::io::csv_format::RowSchema;
use crate::io::store::{load_accounts, save_accounts};
use crate::types::{Account, AccountId, LedgerError};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info, warn};

type AccountHandle = Arc<Mutex<Account>>;

// Mutations are check-then-act with nothing that can panic between the
// check and the write, so a poisoned lock still guards a valid account.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Thread-safe ledger of accounts keyed by identifier
#[derive(Debug)]
pub struct ConcurrentLedger {
    accounts: DashMap<AccountId, AccountHandle>,
    ids: Mutex<Box<dyn IdStrategy>>,
    gate: RwLock<()>,
    schema: RowSchema,
}

impl ConcurrentLedger {
    /// Create an empty ledger keyed by account name
    pub fn new() -> Self {
        Self::with_scheme(IdScheme::default())
    }

    pub fn with_scheme(scheme: IdScheme) -> Self {
        Self::with_strategy(scheme.build())
    }

    pub fn with_strategy(ids: Box<dyn IdStrategy>) -> Self {
        let schema = if ids.uses_name_as_id() {
            RowSchema::Named
        } else {
            RowSchema::Keyed
        };

        Self {
            accounts: DashMap::new(),
            ids: Mutex::new(ids),
            gate: RwLock::new(()),
            schema,
        }
    }

    pub fn schema(&self) -> RowSchema {
        self.schema
    }

    fn handle(&self, id: &str) -> Result<AccountHandle, LedgerError> {
        self.accounts
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LedgerError::account_not_found(id))
    }

    /// Create a new account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `initial_balance` is negative
    /// - `DuplicateIdentifier` if the identifier is already taken
    pub fn create_account(
        &self,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<AccountId, LedgerError> {
        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);

        if initial_balance < Decimal::ZERO {
            return Err(LedgerError::invalid_amount(initial_balance));
        }

        let id = lock(&self.ids).next_id(name)?;

        let mut created = false;
        self.accounts.entry(id.clone()).or_insert_with(|| {
            created = true;
            Arc::new(Mutex::new(Account::new(id.clone(), name, initial_balance)))
        });

        if !created {
            return Err(LedgerError::duplicate_identifier(id));
        }

        debug!(account = %id, balance = %initial_balance, "account created");
        Ok(id)
    }

    /// Snapshot of one account
    ///
    /// The returned value is a copy; later operations do not change it.
    pub fn get_account(&self, id: &str) -> Result<Account, LedgerError> {
        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let handle = self.handle(id)?;
        let account = lock(&handle).clone();
        Ok(account)
    }

    pub fn deposit(&self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let handle = self.handle(id)?;
        let mut account = lock(&handle);
        account.deposit(amount)?;
        debug!(account = id, %amount, balance = %account.balance(), "deposit applied");
        Ok(())
    }

    pub fn withdraw(&self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let handle = self.handle(id)?;
        let mut account = lock(&handle);
        account.withdraw(amount)?;
        debug!(account = id, %amount, balance = %account.balance(), "withdrawal applied");
        Ok(())
    }

    /// Transfer funds between two accounts
    ///
    /// Same checks and order as `Ledger::transfer`. Both account locks are
    /// held from the funds check until the credit is written.
    pub fn transfer(&self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        if from == to {
            return Err(LedgerError::same_account(from));
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        let _gate = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let source = self.handle(from)?;
        let destination = self.handle(to)?;

        // Lower identifier first, whichever direction the money moves.
        let (mut source, mut destination) = if from < to {
            let s = lock(&source);
            let d = lock(&destination);
            (s, d)
        } else {
            let d = lock(&destination);
            let s = lock(&source);
            (s, d)
        };

        Account::move_funds(&mut source, &mut destination, amount)?;
        debug!(from, to, %amount, "transfer applied");
        Ok(())
    }

    /// Snapshot of every account at one consistent point in time, sorted by
    /// identifier
    pub fn accounts(&self) -> Vec<Account> {
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        self.snapshot()
    }

    // Callers hold the gate exclusively.
    fn snapshot(&self) -> Vec<Account> {
        let handles: Vec<AccountHandle> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut accounts: Vec<Account> = handles.iter().map(|h| lock(h).clone()).collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of every balance at one consistent point in time
    pub fn total_balance(&self) -> Decimal {
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        self.snapshot().iter().map(Account::balance).sum()
    }

    /// Write a consistent snapshot of every account to `path`
    pub fn save_to_file(&self, path: &Path) -> Result<(), LedgerError> {
        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        let accounts = self.snapshot();
        save_accounts(path, &accounts, self.schema)?;
        info!(path = %path.display(), accounts = accounts.len(), "ledger saved");
        Ok(())
    }

    /// Replace all accounts with the contents of a ledger file
    ///
    /// The file is parsed and validated before the gate is taken; the
    /// clear-and-replace then runs with exclusive access to the ledger.
    pub fn load_from_file(&self, path: &Path) -> Result<LoadOutcome, LedgerError> {
        let accounts = match load_accounts(path, self.schema) {
            Ok(Some(accounts)) => accounts,
            Ok(None) => {
                info!(path = %path.display(), "ledger file not found, nothing loaded");
                return Ok(LoadOutcome::Missing);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ledger load rejected");
                return Err(e);
            }
        };

        let _gate = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        let mut ids = lock(&self.ids);

        self.accounts.clear();
        for account in accounts {
            ids.observe(account.id());
            self.accounts
                .insert(account.id().clone(), Arc::new(Mutex::new(account)));
        }

        let count = self.accounts.len();
        info!(path = %path.display(), accounts = count, "ledger loaded");
        Ok(LoadOutcome::Loaded { accounts: count })
    }
}

impl Default for ConcurrentLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerOps for ConcurrentLedger {
    fn create_account(
        &mut self,
        name: &str,
        initial_balance: Decimal,
    ) -> Result<AccountId, LedgerError> {
        ConcurrentLedger::create_account(self, name, initial_balance)
    }

    fn account(&self, id: &str) -> Result<Account, LedgerError> {
        self.get_account(id)
    }

    fn deposit(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        ConcurrentLedger::deposit(self, id, amount)
    }

    fn withdraw(&mut self, id: &str, amount: Decimal) -> Result<(), LedgerError> {
        ConcurrentLedger::withdraw(self, id, amount)
    }

    fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), LedgerError> {
        ConcurrentLedger::transfer(self, from, to, amount)
    }

    fn list_accounts(&self) -> Vec<Account> {
        self.accounts()
    }

    fn uses_name_as_id(&self) -> bool {
        self.schema == RowSchema::Named
    }

    fn save_to_file(&self, path: &Path) -> Result<(), LedgerError> {
        ConcurrentLedger::save_to_file(self, path)
    }

    fn load_from_file(&mut self, path: &Path) -> Result<LoadOutcome, LedgerError> {
        ConcurrentLedger::load_from_file(self, path)
    }
}
