//! State-changing operations as data
//!
//! Every mutation of a [`CompliantToken`] can be expressed as an
//! [`Operation`], which is what the journal records and replays.

use ctoken_compliance::RoundOpened;
use ctoken_core::{Address, Amount, ComplianceId};
use ctoken_gate::Authorization;
use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::error::TokenError;
use crate::token::CompliantToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "op", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Operation {
    Issue {
        caller: Address,
        holder: Address,
        amount: Amount,
    },
    OpenRound {
        caller: Address,
        compliance_id: ComplianceId,
    },
    Accept {
        caller: Address,
    },
    Decline {
        caller: Address,
    },
    Transfer {
        caller: Address,
        receiver: Address,
        amount: Amount,
    },
}

impl Operation {
    /// Identity that submitted the operation
    pub fn caller(&self) -> &Address {
        match self {
            Operation::Issue { caller, .. }
            | Operation::OpenRound { caller, .. }
            | Operation::Accept { caller }
            | Operation::Decline { caller }
            | Operation::Transfer { caller, .. } => caller,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Result of a successfully applied operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Issued,
    RoundOpened(RoundOpened),
    Decided { round: ComplianceId },
    Transferred(Authorization),
}

impl CompliantToken {
    /// Apply one operation. Fails without side effects.
    pub fn apply(&mut self, op: &Operation) -> Result<Outcome, TokenError> {
        match op {
            Operation::Issue {
                caller,
                holder,
                amount,
            } => {
                self.issue(caller, *holder, *amount)?;
                Ok(Outcome::Issued)
            }
            Operation::OpenRound {
                caller,
                compliance_id,
            } => Ok(Outcome::RoundOpened(self.open_round(caller, *compliance_id)?)),
            Operation::Accept { caller } => Ok(Outcome::Decided {
                round: self.accept(caller)?,
            }),
            Operation::Decline { caller } => Ok(Outcome::Decided {
                round: self.decline(caller)?,
            }),
            Operation::Transfer {
                caller,
                receiver,
                amount,
            } => Ok(Outcome::Transferred(
                self.transfer(caller, *receiver, *amount)?,
            )),
        }
    }
}
