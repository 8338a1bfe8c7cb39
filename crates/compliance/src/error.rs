//! Compliance errors

use ctoken_core::{Address, ComplianceId};
use thiserror::Error;

use crate::decision::Decision;

/// Errors from the Compliance Engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComplianceError {
    #[error("Compliance id {proposed} must be greater than {floor}")]
    InvalidComplianceId {
        proposed: ComplianceId,
        floor: ComplianceId,
    },

    #[error("No pending compliance update")]
    NoActiveRound,

    #[error("Already signed off: {holder} {decision} compliance {round}")]
    AlreadyDecided {
        holder: Address,
        round: ComplianceId,
        decision: Decision,
    },

    #[error("Not a token holder: {0}")]
    NotAHolder(Address),
}

/// Result type for compliance operations
pub type ComplianceResult<T> = Result<T, ComplianceError>;
