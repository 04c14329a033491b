//! Account-related types for the ledger
//!
//! This module defines the Account structure and its balance operations.
//! Accounts are created and mutated only through a ledger; the balance
//! mutators are crate-private but enforce their own contracts so they stay
//! correct regardless of the caller.

use super::error::LedgerError;
use super::id::AccountId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A single named balance holder
///
/// The balance is an exact decimal and is never negative at any observable
/// point: every mutation is validated before it is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    name: String,
    balance: Decimal,
}

/// Persistence-row representation of an account
///
/// The balance is carried as the exact decimal string so that export and
/// re-import never pass through a binary floating-point value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    pub account_id: String,
    pub name: String,
    pub balance: String,
}

impl Account {
    /// Build an account from already validated parts
    ///
    /// Callers (the ledgers and the CSV loader) check that `balance` is not
    /// negative before constructing.
    pub(crate) fn new(id: AccountId, name: impl Into<String>, mut balance: Decimal) -> Self {
        debug_assert!(balance >= Decimal::ZERO);
        // "-0" parses to a negative zero; store it as plain zero
        if balance.is_zero() {
            balance.set_sign_positive(true);
        }
        Account {
            id,
            name: name.into(),
            balance,
        }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Credit funds to the account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `ArithmeticOverflow` if the new balance leaves the decimal range or
    ///   would need more significant digits than a `Decimal` holds
    pub(crate) fn deposit(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        self.balance = exact_add(self.balance, amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", &self.id))?;

        Ok(())
    }

    /// Debit funds from the account
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `amount` exceeds the balance
    /// - `ArithmeticOverflow` if the new balance cannot be held exactly
    pub(crate) fn withdraw(&mut self, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        if amount > self.balance {
            return Err(LedgerError::insufficient_funds(
                &self.id,
                self.balance,
                amount,
            ));
        }

        // amount <= balance, so this cannot go below zero
        self.balance = exact_sub(self.balance, amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("withdrawal", &self.id))?;

        Ok(())
    }

    /// Move `amount` from `source` to `destination` as one step
    ///
    /// Every check runs before either balance changes, so on error both
    /// accounts are exactly as they were.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if `amount <= 0`
    /// - `InsufficientFunds` if `source` holds less than `amount`
    /// - `ArithmeticOverflow` if either new balance cannot be held exactly
    pub(crate) fn move_funds(
        source: &mut Account,
        destination: &mut Account,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_amount(amount));
        }

        if source.balance < amount {
            return Err(LedgerError::insufficient_funds(
                &source.id,
                source.balance,
                amount,
            ));
        }

        let debited = exact_sub(source.balance, amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", &source.id))?;
        let credited = exact_add(destination.balance, amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("transfer", &destination.id))?;

        source.balance = debited;
        destination.balance = credited;

        Ok(())
    }

    pub fn to_row(&self) -> AccountRow {
        AccountRow {
            account_id: self.id.to_string(),
            name: self.name.clone(),
            balance: self.balance.to_string(),
        }
    }
}

// Decimal addition rounds once a result needs more than 28 significant
// digits. Both helpers return `None` unless the result is exact.
fn exact_add(balance: Decimal, amount: Decimal) -> Option<Decimal> {
    let sum = balance.checked_add(amount)?;
    let exact = sum.checked_sub(amount) == Some(balance) && sum.checked_sub(balance) == Some(amount);
    exact.then_some(sum)
}

fn exact_sub(balance: Decimal, amount: Decimal) -> Option<Decimal> {
    let difference = balance.checked_sub(amount)?;
    let exact = difference.checked_add(amount) == Some(balance)
        && balance.checked_sub(difference) == Some(amount);
    exact.then_some(difference)
}
