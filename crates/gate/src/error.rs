//! Transfer gate errors

use ctoken_core::{Address, ComplianceId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Transfer not allowed when pending compliance exists (compliance {round}, sender {sender})")]
    PendingComplianceBlocksTransfer { sender: Address, round: ComplianceId },

    #[error("Token holder who declines the change in terms and conditions only can transfer tokens to token issuer (sender {sender}, receiver {receiver})")]
    DeclinedHolderRestricted { sender: Address, receiver: Address },

    #[error("Tokens can only be transfered to token holders accept the latest compliance (receiver {receiver}, compliance {round})")]
    ReceiverNotCompliant { receiver: Address, round: ComplianceId },
}
