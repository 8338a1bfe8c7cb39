//! In-memory balance ledger

use crate::error::LedgerError;
use ctoken_core::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Balance per holder plus total supply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLedger {
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

impl BalanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get balance for a holder (returns 0 if never credited)
    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Mint `amount` to `holder`.
    ///
    /// Authorization is the caller's job; this only enforces amount rules.
    pub fn mint(&mut self, holder: Address, amount: Amount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let new_balance = self
            .balance_of(&holder)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow { account: holder })?;
        let new_supply = self
            .total_supply
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow { account: holder })?;

        self.balances.insert(holder, new_balance);
        self.total_supply = new_supply;
        debug!(%holder, %amount, supply = %new_supply, "minted");
        Ok(())
    }

    /// Check that `from` can send `amount` to `to` without mutating anything
    pub fn check_transfer(
        &self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                account: *from,
                available,
                required: amount,
            });
        }

        if from != to {
            self.balance_of(to)
                .checked_add(&amount)
                .ok_or(LedgerError::Overflow { account: *to })?;
        }

        Ok(())
    }

    /// Debit `from` and credit `to` as one step.
    ///
    /// Every check runs before the first write, so a failed transfer leaves
    /// both balances untouched.
    pub fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), LedgerError> {
        self.check_transfer(&from, &to, amount)?;

        if from == to {
            return Ok(());
        }

        let available = self.balance_of(&from);
        let debited = available
            .checked_sub(&amount)
            .ok_or(LedgerError::InsufficientBalance {
                account: from,
                available,
                required: amount,
            })?;
        let credited = self
            .balance_of(&to)
            .checked_add(&amount)
            .ok_or(LedgerError::Overflow { account: to })?;
        self.balances.insert(from, debited);
        self.balances.insert(to, credited);

        debug!(%from, %to, %amount, "balances moved");
        Ok(())
    }

    /// Iterate over all balances (unordered)
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }
}
