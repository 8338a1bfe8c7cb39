//! Ledger errors

use ctoken_core::{Address, Amount};
use thiserror::Error;

/// Errors that can occur in balance ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Insufficient balance for {account}: available {available}, required {required}")]
    InsufficientBalance {
        account: Address,
        available: Amount,
        required: Amount,
    },

    #[error("Balance overflow crediting {account}")]
    Overflow { account: Address },
}
