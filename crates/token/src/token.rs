//! CompliantToken - wires ledger, compliance engine and transfer gate together

use ctoken_compliance::{ComplianceEngine, Decision, RoundOpened, RoundState};
use ctoken_core::{Address, Amount, ComplianceId};
use ctoken_gate::{Authorization, TransferGate};
use ctoken_ledger::BalanceLedger;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::TokenConfig;
use crate::error::TokenError;

/// Read-only view of one holder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolderSummary {
    pub address: Address,
    pub balance: Amount,
    pub last_acknowledged: ComplianceId,
    pub decision: Decision,
}

/// Regulated token
///
/// Single writer: every mutating method takes `&mut self` and either fully
/// applies or returns an error with no state change.
#[derive(Debug, Clone)]
pub struct CompliantToken {
    config: TokenConfig,
    ledger: BalanceLedger,
    compliance: ComplianceEngine,
    gate: TransferGate,
}

impl CompliantToken {
    /// Deploy a new token
    pub fn new(config: TokenConfig) -> Result<Self, TokenError> {
        config.validate()?;

        info!(
            name = %config.name,
            symbol = %config.symbol,
            issuer = %config.issuer,
            compliance = %config.initial_compliance_id,
            "token deployed"
        );

        Ok(Self {
            ledger: BalanceLedger::new(),
            compliance: ComplianceEngine::new(config.initial_compliance_id),
            gate: TransferGate::new(config.issuer),
            config,
        })
    }

    fn require_issuer(&self, caller: &Address) -> Result<(), TokenError> {
        if *caller != self.config.issuer {
            warn!(%caller, "rejected: caller is not the issuer");
            return Err(TokenError::Unauthorized { caller: *caller });
        }
        Ok(())
    }

    // === Issuer operations ===

    /// Mint `amount` to `holder`. A new holder starts caught up with the
    /// current compliance version.
    pub fn issue(&mut self, caller: &Address, holder: Address, amount: Amount) -> Result<(), TokenError> {
        self.require_issuer(caller)?;
        self.ledger.mint(holder, amount)?;
        let new_holder = self.compliance.register(holder);

        info!(
            %holder,
            %amount,
            new_holder,
            holders = self.compliance.total_holders(),
            "tokens issued"
        );
        Ok(())
    }

    /// Propose a new compliance version every holder must acknowledge
    pub fn open_round(&mut self, caller: &Address, new_id: ComplianceId) -> Result<RoundOpened, TokenError> {
        self.require_issuer(caller)?;
        Ok(self.compliance.open_round(new_id)?)
    }

    // === Holder operations ===

    pub fn accept(&mut self, caller: &Address) -> Result<ComplianceId, TokenError> {
        self.compliance.accept(*caller).map_err(|e| {
            warn!(holder = %caller, error = %e, "accept rejected");
            TokenError::from(e)
        })
    }

    pub fn decline(&mut self, caller: &Address) -> Result<ComplianceId, TokenError> {
        self.compliance.decline(*caller).map_err(|e| {
            warn!(holder = %caller, error = %e, "decline rejected");
            TokenError::from(e)
        })
    }

    /// Move `amount` from `caller` to `receiver`.
    ///
    /// Flow: Gate check → Ledger debit/credit → register receiver
    pub fn transfer(
        &mut self,
        caller: &Address,
        receiver: Address,
        amount: Amount,
    ) -> Result<Authorization, TokenError> {
        let authorization = self
            .gate
            .check(&self.compliance, caller, &receiver)
            .map_err(|e| {
                warn!(sender = %caller, %receiver, error = %e, "transfer rejected by gate");
                TokenError::from(e)
            })?;

        self.ledger.transfer(*caller, receiver, amount)?;
        self.compliance.register(receiver);

        info!(sender = %caller, %receiver, %amount, %authorization, "transfer");
        Ok(authorization)
    }

    // === Read accessors ===

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    pub fn decimals(&self) -> u32 {
        self.config.decimals
    }

    pub fn issuer(&self) -> &Address {
        &self.config.issuer
    }

    pub fn document_registry(&self) -> &str {
        &self.config.document_registry
    }

    pub fn balance_of(&self, holder: &Address) -> Amount {
        self.ledger.balance_of(holder)
    }

    pub fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    pub fn current_compliance_id(&self) -> ComplianceId {
        self.compliance.current_id()
    }

    pub fn pending_compliance_id(&self) -> Option<ComplianceId> {
        self.compliance.pending_id()
    }

    /// Last compliance version `holder` acknowledged; `None` if never registered
    pub fn holder_compliance(&self, holder: &Address) -> Option<ComplianceId> {
        self.compliance.last_acknowledged(holder)
    }

    pub fn decision_of(&self, holder: &Address) -> Decision {
        self.compliance.decision_of(holder)
    }

    pub fn total_holders(&self) -> usize {
        self.compliance.total_holders()
    }

    pub fn eligible_holders(&self) -> usize {
        self.compliance.eligible_holders()
    }

    pub fn sign_off_count(&self) -> usize {
        self.compliance.sign_off_count()
    }

    pub fn decline_count(&self) -> usize {
        self.compliance.decline_count()
    }

    pub fn round_state(&self) -> RoundState {
        self.compliance.state()
    }

    pub fn is_round_complete(&self) -> bool {
        self.compliance.is_complete()
    }

    /// All holders in registration order
    pub fn holders(&self) -> Vec<HolderSummary> {
        self.compliance
            .holders()
            .map(|record| HolderSummary {
                address: record.address,
                balance: self.ledger.balance_of(&record.address),
                last_acknowledged: record.last_acknowledged,
                decision: self.compliance.decision_of(&record.address),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    const ISSUER: u8 = 0xee;

    fn deploy() -> CompliantToken {
        let config = TokenConfig::new("Compliant Token", "CTT", "registry", addr(ISSUER))
            .with_initial_compliance_id(ComplianceId::new(1));
        CompliantToken::new(config).unwrap()
    }

    #[test]
    fn test_only_issuer_can_issue() {
        let mut token = deploy();

        let err = token.issue(&addr(1), addr(1), Amount::new(100)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(token.total_supply(), Amount::ZERO);
        assert_eq!(token.total_holders(), 0);
    }

    #[test]
    fn test_issue_zero_rejected_without_registering() {
        let mut token = deploy();

        let err = token.issue(&addr(ISSUER), addr(1), Amount::ZERO).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidAmount);
        assert_eq!(token.total_holders(), 0);
        assert_eq!(token.holder_compliance(&addr(1)), None);
    }

    #[test]
    fn test_issue_registers_holder_once() {
        let mut token = deploy();

        token.issue(&addr(ISSUER), addr(1), Amount::new(100)).unwrap();
        assert_eq!(token.total_holders(), 1);
        token.issue(&addr(ISSUER), addr(1), Amount::new(100)).unwrap();
        assert_eq!(token.total_holders(), 1);

        assert_eq!(token.balance_of(&addr(1)), Amount::new(200));
        assert_eq!(token.holder_compliance(&addr(1)), Some(ComplianceId::new(1)));
    }

    #[test]
    fn test_only_issuer_can_open_round() {
        let mut token = deploy();
        token.issue(&addr(ISSUER), addr(1), Amount::new(100)).unwrap();

        let err = token.open_round(&addr(1), ComplianceId::new(2)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(token.pending_compliance_id(), None);
    }

    #[test]
    fn test_transfer_registers_receiver() {
        let mut token = deploy();
        token.issue(&addr(ISSUER), addr(1), Amount::new(1000)).unwrap();

        let auth = token.transfer(&addr(1), addr(2), Amount::new(100)).unwrap();

        assert_eq!(auth, Authorization::Unrestricted);
        assert_eq!(token.total_holders(), 2);
        assert_eq!(token.holder_compliance(&addr(2)), Some(ComplianceId::new(1)));
    }

    #[test]
    fn test_insufficient_balance_leaves_state() {
        let mut token = deploy();
        token.issue(&addr(ISSUER), addr(1), Amount::new(10)).unwrap();

        let err = token.transfer(&addr(1), addr(2), Amount::new(11)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InsufficientBalance);
        assert_eq!(token.balance_of(&addr(1)), Amount::new(10));
        assert_eq!(token.total_holders(), 1);
    }

    #[test]
    fn test_holders_listing() {
        let mut token = deploy();
        token.issue(&addr(ISSUER), addr(2), Amount::new(5)).unwrap();
        token.issue(&addr(ISSUER), addr(1), Amount::new(7)).unwrap();
        token.open_round(&addr(ISSUER), ComplianceId::new(2)).unwrap();
        token.accept(&addr(1)).unwrap();

        let holders = token.holders();

        assert_eq!(holders.len(), 2);
        assert_eq!(holders[0].address, addr(2));
        assert_eq!(holders[0].decision, Decision::None);
        assert_eq!(holders[1].balance, Amount::new(7));
        assert_eq!(holders[1].decision, Decision::Accepted);
        assert_eq!(holders[1].last_acknowledged, ComplianceId::new(2));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TokenConfig::new("", "CTT", "registry", addr(ISSUER));
        assert!(matches!(
            CompliantToken::new(config),
            Err(TokenError::InvalidConfig(_))
        ));
    }
}
