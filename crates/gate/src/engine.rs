//! Transfer gate implementation

use ctoken_compliance::{ComplianceEngine, Decision};
use ctoken_core::Address;
use strum_macros::Display;
use tracing::debug;

use crate::error::GateError;

/// Why a transfer was admitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Authorization {
    /// No round is open
    Unrestricted,
    /// Sender and receiver both accepted the pending round
    Compliant,
    /// Sender declined and is returning tokens to the issuer
    ReturnToIssuer,
}

/// Transfer Gate
///
/// Rules while a round is pending, by sender decision:
/// - `DECLINED`: only to the issuer
/// - `NONE`: nothing
/// - `ACCEPTED`: only to holders whose last acknowledged version is the pending one
#[derive(Debug, Clone)]
pub struct TransferGate {
    issuer: Address,
}

impl TransferGate {
    pub fn new(issuer: Address) -> Self {
        Self { issuer }
    }

    pub fn issuer(&self) -> &Address {
        &self.issuer
    }

    /// Decide whether `sender` may move tokens to `receiver`.
    ///
    /// Balance sufficiency is checked by the ledger, not here.
    pub fn check(
        &self,
        compliance: &ComplianceEngine,
        sender: &Address,
        receiver: &Address,
    ) -> Result<Authorization, GateError> {
        let Some(round) = compliance.pending_id() else {
            return Ok(Authorization::Unrestricted);
        };

        let authorization = match compliance.decision_of(sender) {
            Decision::Declined => {
                if *receiver != self.issuer {
                    return Err(GateError::DeclinedHolderRestricted {
                        sender: *sender,
                        receiver: *receiver,
                    });
                }
                Authorization::ReturnToIssuer
            }
            Decision::None => {
                return Err(GateError::PendingComplianceBlocksTransfer {
                    sender: *sender,
                    round,
                });
            }
            Decision::Accepted => {
                if compliance.last_acknowledged(receiver) != Some(round) {
                    return Err(GateError::ReceiverNotCompliant {
                        receiver: *receiver,
                        round,
                    });
                }
                Authorization::Compliant
            }
        };

        debug!(%sender, %receiver, %round, %authorization, "transfer admitted");
        Ok(authorization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctoken_core::ComplianceId;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    const ISSUER: u8 = 0xee;

    fn setup() -> (TransferGate, ComplianceEngine) {
        let mut compliance = ComplianceEngine::new(ComplianceId::new(1));
        compliance.register(addr(1));
        compliance.register(addr(2));
        (TransferGate::new(addr(ISSUER)), compliance)
    }

    #[test]
    fn test_settled_allows_anything() {
        let (gate, compliance) = setup();
        assert_eq!(
            gate.check(&compliance, &addr(1), &addr(9)),
            Ok(Authorization::Unrestricted)
        );
    }

    #[test]
    fn test_undecided_sender_blocked() {
        let (gate, mut compliance) = setup();
        compliance.open_round(ComplianceId::new(2)).unwrap();

        let result = gate.check(&compliance, &addr(1), &addr(ISSUER));
        assert_eq!(
            result,
            Err(GateError::PendingComplianceBlocksTransfer {
                sender: addr(1),
                round: ComplianceId::new(2),
            })
        );
    }

    #[test]
    fn test_declined_sender_only_to_issuer() {
        let (gate, mut compliance) = setup();
        compliance.open_round(ComplianceId::new(2)).unwrap();
        compliance.decline(addr(2)).unwrap();

        assert!(matches!(
            gate.check(&compliance, &addr(2), &addr(1)),
            Err(GateError::DeclinedHolderRestricted { .. })
        ));
        assert_eq!(
            gate.check(&compliance, &addr(2), &addr(ISSUER)),
            Ok(Authorization::ReturnToIssuer)
        );
    }

    #[test]
    fn test_accepted_sender_needs_compliant_receiver() {
        let (gate, mut compliance) = setup();
        compliance.open_round(ComplianceId::new(2)).unwrap();
        compliance.accept(addr(1)).unwrap();

        assert_eq!(
            gate.check(&compliance, &addr(1), &addr(2)),
            Err(GateError::ReceiverNotCompliant {
                receiver: addr(2),
                round: ComplianceId::new(2),
            })
        );

        compliance.accept(addr(2)).unwrap();
        assert_eq!(
            gate.check(&compliance, &addr(1), &addr(2)),
            Ok(Authorization::Compliant)
        );
    }

    #[test]
    fn test_unknown_receiver_is_not_compliant() {
        let (gate, mut compliance) = setup();
        compliance.open_round(ComplianceId::new(2)).unwrap();
        compliance.accept(addr(1)).unwrap();

        assert!(matches!(
            gate.check(&compliance, &addr(1), &addr(42)),
            Err(GateError::ReceiverNotCompliant { .. })
        ));
    }

    #[test]
    fn test_check_has_no_side_effects() {
        let (gate, mut compliance) = setup();
        compliance.open_round(ComplianceId::new(2)).unwrap();

        let _ = gate.check(&compliance, &addr(1), &addr(2));
        let _ = gate.check(&compliance, &addr(1), &addr(2));

        assert_eq!(compliance.decision_of(&addr(1)), Decision::None);
        assert_eq!(compliance.sign_off_count(), 0);
    }
}
