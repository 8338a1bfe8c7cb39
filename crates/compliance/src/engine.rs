//! Compliance Engine - keeps the holder registry and round state in step

use ctoken_core::{Address, ComplianceId};
use tracing::{debug, info};

use crate::decision::{Acknowledgment, Decision};
use crate::error::{ComplianceError, ComplianceResult};
use crate::registry::{HolderRecord, HolderRegistry};
use crate::round::{ComplianceRound, RoundState};

/// Outcome of opening a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundOpened {
    pub id: ComplianceId,
    /// Round that was still pending and got promoted to current
    pub superseded: Option<ComplianceId>,
    /// No holder was registered, so the id became current immediately
    pub settled: bool,
    /// Holders that owe a decision
    pub eligible: usize,
}

/// Compliance state machine
///
/// Owns the [`HolderRegistry`] and the [`ComplianceRound`]. Every mutating
/// method validates fully before its first write.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    registry: HolderRegistry,
    round: ComplianceRound,
}

impl ComplianceEngine {
    pub fn new(initial: ComplianceId) -> Self {
        Self {
            registry: HolderRegistry::new(),
            round: ComplianceRound::new(initial),
        }
    }

    /// Register a holder caught up with the current version.
    ///
    /// Returns `true` if the holder is new. A holder registered while a round
    /// is pending joins that round.
    pub fn register(&mut self, holder: Address) -> bool {
        let added = self.registry.register(holder, self.round.current());
        if added {
            self.round.enroll();
            debug!(%holder, total = self.registry.len(), "holder registered");
        }
        added
    }

    /// Check that `new_id` may open a round
    pub fn check_open_round(&self, new_id: ComplianceId) -> ComplianceResult<()> {
        let floor = self.round.floor();
        if new_id <= floor {
            return Err(ComplianceError::InvalidComplianceId {
                proposed: new_id,
                floor,
            });
        }
        Ok(())
    }

    /// Open a compliance round for `new_id`
    pub fn open_round(&mut self, new_id: ComplianceId) -> ComplianceResult<RoundOpened> {
        self.check_open_round(new_id)?;

        let eligible = self.registry.len();
        let superseded = self.round.open(new_id, eligible);
        let opened = RoundOpened {
            id: new_id,
            superseded,
            settled: eligible == 0,
            eligible,
        };

        info!(
            id = %new_id,
            current = %self.round.current(),
            eligible,
            superseded = ?superseded,
            state = %self.round.state(),
            "compliance round opened"
        );
        Ok(opened)
    }

    /// Check that `holder` may submit a decision now
    pub fn check_decision(&self, holder: &Address) -> ComplianceResult<ComplianceId> {
        let round = self.round.pending().ok_or(ComplianceError::NoActiveRound)?;
        self.registry.check_decision(holder, round)?;
        Ok(round)
    }

    /// Record `holder`'s acknowledgment of the pending round
    pub fn acknowledge(&mut self, holder: Address, ack: Acknowledgment) -> ComplianceResult<ComplianceId> {
        let round = self.check_decision(&holder)?;
        let decision = Decision::from(ack);
        self.registry.record_decision(holder, round, decision)?;

        match decision {
            Decision::Accepted => self.round.record_sign_off(),
            Decision::Declined => self.round.record_decline(),
            Decision::None => {}
        }

        info!(
            %holder,
            round = %round,
            %decision,
            sign_offs = self.round.sign_off_count(),
            eligible = self.round.total_holders(),
            "compliance decision recorded"
        );
        Ok(round)
    }

    pub fn accept(&mut self, holder: Address) -> ComplianceResult<ComplianceId> {
        self.acknowledge(holder, Acknowledgment::Accept)
    }

    pub fn decline(&mut self, holder: Address) -> ComplianceResult<ComplianceId> {
        self.acknowledge(holder, Acknowledgment::Decline)
    }

    // === Read accessors ===

    /// Decision of `holder` in the pending round (`None` when settled or unknown)
    pub fn decision_of(&self, holder: &Address) -> Decision {
        match self.round.pending() {
            Some(round) => self.registry.decision_of(holder, round),
            None => Decision::None,
        }
    }

    pub fn last_acknowledged(&self, holder: &Address) -> Option<ComplianceId> {
        self.registry.last_acknowledged(holder)
    }

    pub fn is_holder(&self, holder: &Address) -> bool {
        self.registry.contains(holder)
    }

    pub fn current_id(&self) -> ComplianceId {
        self.round.current()
    }

    pub fn pending_id(&self) -> Option<ComplianceId> {
        self.round.pending()
    }

    pub fn state(&self) -> RoundState {
        self.round.state()
    }

    /// Number of registered holders
    pub fn total_holders(&self) -> usize {
        self.registry.len()
    }

    /// Holders eligible to decide in the pending round.
    ///
    /// Counted when the round opens and grows by one for every holder
    /// registered while it is pending, so it is not a fixed snapshot.
    pub fn eligible_holders(&self) -> usize {
        self.round.total_holders()
    }

    pub fn sign_off_count(&self) -> usize {
        self.round.sign_off_count()
    }

    pub fn decline_count(&self) -> usize {
        self.round.decline_count()
    }

    pub fn is_complete(&self) -> bool {
        self.round.is_complete()
    }

    pub fn holders(&self) -> impl Iterator<Item = &HolderRecord> {
        self.registry.iter()
    }

    pub fn round(&self) -> &ComplianceRound {
        &self.round
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    fn engine_with_holders(n: u8) -> ComplianceEngine {
        let mut engine = ComplianceEngine::new(ComplianceId::new(1));
        for b in 1..=n {
            engine.register(addr(b));
        }
        engine
    }

    #[test]
    fn test_open_round_requires_greater_id() {
        let mut engine = engine_with_holders(1);

        let result = engine.open_round(ComplianceId::new(1));
        assert_eq!(
            result,
            Err(ComplianceError::InvalidComplianceId {
                proposed: ComplianceId::new(1),
                floor: ComplianceId::new(1),
            })
        );
        assert_eq!(engine.state(), RoundState::Settled);
    }

    #[test]
    fn test_open_round_snapshot() {
        let mut engine = engine_with_holders(2);

        let opened = engine.open_round(ComplianceId::new(2)).unwrap();

        assert_eq!(opened.eligible, 2);
        assert!(!opened.settled);
        assert_eq!(engine.current_id(), ComplianceId::new(1));
        assert_eq!(engine.pending_id(), Some(ComplianceId::new(2)));
        assert_eq!(engine.sign_off_count(), 0);
    }

    #[test]
    fn test_decision_without_round() {
        let mut engine = engine_with_holders(1);
        assert_eq!(engine.accept(addr(1)), Err(ComplianceError::NoActiveRound));
        assert_eq!(engine.decline(addr(1)), Err(ComplianceError::NoActiveRound));
    }

    #[test]
    fn test_accept_once_per_round() {
        let mut engine = engine_with_holders(2);
        engine.open_round(ComplianceId::new(2)).unwrap();

        engine.accept(addr(1)).unwrap();
        assert_eq!(engine.sign_off_count(), 1);

        let again = engine.accept(addr(1));
        assert!(matches!(again, Err(ComplianceError::AlreadyDecided { .. })));
        assert_eq!(engine.sign_off_count(), 1);
    }

    #[test]
    fn test_decline_does_not_count_as_sign_off() {
        let mut engine = engine_with_holders(2);
        engine.open_round(ComplianceId::new(2)).unwrap();

        engine.accept(addr(1)).unwrap();
        engine.decline(addr(2)).unwrap();

        assert_eq!(engine.sign_off_count(), 1);
        assert_eq!(engine.decline_count(), 1);
        assert_eq!(engine.decision_of(&addr(2)), Decision::Declined);
        assert_eq!(engine.last_acknowledged(&addr(1)), Some(ComplianceId::new(2)));
        assert_eq!(engine.last_acknowledged(&addr(2)), Some(ComplianceId::new(1)));
        assert!(engine.is_complete());
    }

    #[test]
    fn test_new_round_resets_decisions() {
        let mut engine = engine_with_holders(2);
        engine.open_round(ComplianceId::new(2)).unwrap();
        engine.decline(addr(1)).unwrap();

        engine.open_round(ComplianceId::new(3)).unwrap();

        assert_eq!(engine.decision_of(&addr(1)), Decision::None);
        assert_eq!(engine.current_id(), ComplianceId::new(2));
        assert!(engine.accept(addr(1)).is_ok());
    }

    #[test]
    fn test_superseded_round_raises_floor() {
        let mut engine = engine_with_holders(1);
        engine.open_round(ComplianceId::new(5)).unwrap();

        let result = engine.open_round(ComplianceId::new(4));
        assert!(matches!(result, Err(ComplianceError::InvalidComplianceId { .. })));
        assert_eq!(engine.pending_id(), Some(ComplianceId::new(5)));
    }

    #[test]
    fn test_open_round_with_no_holders_settles() {
        let mut engine = ComplianceEngine::new(ComplianceId::new(0));

        let opened = engine.open_round(ComplianceId::new(1)).unwrap();

        assert!(opened.settled);
        assert_eq!(engine.current_id(), ComplianceId::new(1));
        assert_eq!(engine.pending_id(), None);

        engine.register(addr(1));
        assert_eq!(engine.last_acknowledged(&addr(1)), Some(ComplianceId::new(1)));
    }

    #[test]
    fn test_late_holder_joins_pending_round() {
        let mut engine = engine_with_holders(1);
        engine.open_round(ComplianceId::new(2)).unwrap();

        engine.register(addr(2));

        assert_eq!(engine.total_holders(), 2);
        assert_eq!(engine.eligible_holders(), 2);
        assert_eq!(engine.last_acknowledged(&addr(2)), Some(ComplianceId::new(1)));
        engine.accept(addr(2)).unwrap();
        assert!(engine.sign_off_count() <= engine.eligible_holders());
    }

    #[test]
    fn test_stranger_cannot_decide() {
        let mut engine = engine_with_holders(1);
        engine.open_round(ComplianceId::new(2)).unwrap();

        assert_eq!(engine.accept(addr(9)), Err(ComplianceError::NotAHolder(addr(9))));
        assert_eq!(engine.sign_off_count(), 0);
    }
}
