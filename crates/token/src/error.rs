//! Token errors
//!
//! Component errors are wrapped as-is; [`TokenError::kind`] flattens them
//! into one list of rejection reasons for callers that only need to branch.

use ctoken_compliance::ComplianceError;
use ctoken_core::Address;
use ctoken_gate::GateError;
use ctoken_ledger::LedgerError;
use strum_macros::{Display, EnumString};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Caller {caller} is not the token issuer")]
    Unauthorized { caller: Address },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error("Invalid token config: {0}")]
    InvalidConfig(String),
}

/// Flat rejection reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum ErrorKind {
    Unauthorized,
    InvalidAmount,
    InsufficientBalance,
    Overflow,
    InvalidComplianceId,
    NoActiveRound,
    AlreadyDecided,
    NotAHolder,
    PendingComplianceBlocksTransfer,
    DeclinedHolderRestricted,
    ReceiverNotCompliant,
    InvalidConfig,
}

impl TokenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TokenError::Unauthorized { .. } => ErrorKind::Unauthorized,
            TokenError::Ledger(e) => match e {
                LedgerError::InvalidAmount => ErrorKind::InvalidAmount,
                LedgerError::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
                LedgerError::Overflow { .. } => ErrorKind::Overflow,
            },
            TokenError::Compliance(e) => match e {
                ComplianceError::InvalidComplianceId { .. } => ErrorKind::InvalidComplianceId,
                ComplianceError::NoActiveRound => ErrorKind::NoActiveRound,
                ComplianceError::AlreadyDecided { .. } => ErrorKind::AlreadyDecided,
                ComplianceError::NotAHolder(_) => ErrorKind::NotAHolder,
            },
            TokenError::Gate(e) => match e {
                GateError::PendingComplianceBlocksTransfer { .. } => {
                    ErrorKind::PendingComplianceBlocksTransfer
                }
                GateError::DeclinedHolderRestricted { .. } => ErrorKind::DeclinedHolderRestricted,
                GateError::ReceiverNotCompliant { .. } => ErrorKind::ReceiverNotCompliant,
            },
            TokenError::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }
}
