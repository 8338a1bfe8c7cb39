//! Holder registry
//!
//! Every address that has ever received tokens, in registration order, with
//! the last compliance version it acknowledged.
//!
//! Decisions are keyed by `(holder, round id)` rather than stored as a flag on
//! the holder, so opening a new round implicitly resets everybody to
//! [`Decision::None`] and a decision from an earlier round can never be read
//! as valid for the current one.

use std::collections::HashMap;

use ctoken_core::{Address, ComplianceId};

use crate::decision::Decision;
use crate::error::{ComplianceError, ComplianceResult};

/// Per-holder compliance record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolderRecord {
    pub address: Address,
    /// Last compliance version this holder accepted (or the current one at registration)
    pub last_acknowledged: ComplianceId,
    /// Position in registration order
    pub index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct HolderRegistry {
    order: Vec<Address>,
    records: HashMap<Address, HolderRecord>,
    decisions: HashMap<(Address, ComplianceId), Decision>,
}

impl HolderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a holder. Idempotent; returns `true` if the holder is new.
    ///
    /// A new holder starts caught up with `current`.
    pub fn register(&mut self, holder: Address, current: ComplianceId) -> bool {
        if self.records.contains_key(&holder) {
            return false;
        }

        let record = HolderRecord {
            address: holder,
            last_acknowledged: current,
            index: self.order.len(),
        };
        self.order.push(holder);
        self.records.insert(holder, record);
        true
    }

    pub fn contains(&self, holder: &Address) -> bool {
        self.records.contains_key(holder)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, holder: &Address) -> Option<&HolderRecord> {
        self.records.get(holder)
    }

    pub fn last_acknowledged(&self, holder: &Address) -> Option<ComplianceId> {
        self.records.get(holder).map(|r| r.last_acknowledged)
    }

    /// Holders in registration order
    pub fn iter(&self) -> impl Iterator<Item = &HolderRecord> {
        self.order.iter().filter_map(|a| self.records.get(a))
    }

    /// Decision of `holder` in `round`; `None` for unknown holders
    pub fn decision_of(&self, holder: &Address, round: ComplianceId) -> Decision {
        self.decisions
            .get(&(*holder, round))
            .copied()
            .unwrap_or_default()
    }

    /// Check that `holder` may decide in `round` without recording anything
    pub fn check_decision(&self, holder: &Address, round: ComplianceId) -> ComplianceResult<()> {
        if !self.contains(holder) {
            return Err(ComplianceError::NotAHolder(*holder));
        }

        let existing = self.decision_of(holder, round);
        if existing != Decision::None {
            return Err(ComplianceError::AlreadyDecided {
                holder: *holder,
                round,
                decision: existing,
            });
        }

        Ok(())
    }

    /// Record a decision. Accepting moves the holder's acknowledged version to `round`.
    pub fn record_decision(
        &mut self,
        holder: Address,
        round: ComplianceId,
        decision: Decision,
    ) -> ComplianceResult<()> {
        self.check_decision(&holder, round)?;

        if decision == Decision::Accepted {
            if let Some(record) = self.records.get_mut(&holder) {
                record.last_acknowledged = round;
            }
        }
        self.decisions.insert((holder, round), decision);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = HolderRegistry::new();

        assert!(registry.register(addr(1), ComplianceId::new(1)));
        assert!(!registry.register(addr(1), ComplianceId::new(5)));
        assert_eq!(registry.len(), 1);
        // Second registration must not touch the record
        assert_eq!(registry.last_acknowledged(&addr(1)), Some(ComplianceId::new(1)));
    }

    #[test]
    fn test_iteration_follows_registration_order() {
        let mut registry = HolderRegistry::new();
        for b in [3, 1, 2] {
            registry.register(addr(b), ComplianceId::new(1));
        }

        let order: Vec<_> = registry.iter().map(|r| r.address).collect();
        assert_eq!(order, vec![addr(3), addr(1), addr(2)]);
        assert_eq!(registry.get(&addr(2)).unwrap().index, 2);
    }

    #[test]
    fn test_unknown_holder_decision_is_none() {
        let registry = HolderRegistry::new();
        assert_eq!(registry.decision_of(&addr(9), ComplianceId::new(2)), Decision::None);
    }

    #[test]
    fn test_accept_updates_last_acknowledged() {
        let mut registry = HolderRegistry::new();
        registry.register(addr(1), ComplianceId::new(1));

        registry
            .record_decision(addr(1), ComplianceId::new(2), Decision::Accepted)
            .unwrap();

        assert_eq!(registry.decision_of(&addr(1), ComplianceId::new(2)), Decision::Accepted);
        assert_eq!(registry.last_acknowledged(&addr(1)), Some(ComplianceId::new(2)));
    }

    #[test]
    fn test_decline_keeps_last_acknowledged() {
        let mut registry = HolderRegistry::new();
        registry.register(addr(1), ComplianceId::new(1));

        registry
            .record_decision(addr(1), ComplianceId::new(2), Decision::Declined)
            .unwrap();

        assert_eq!(registry.last_acknowledged(&addr(1)), Some(ComplianceId::new(1)));
    }

    #[test]
    fn test_second_decision_rejected() {
        let mut registry = HolderRegistry::new();
        registry.register(addr(1), ComplianceId::new(1));
        registry
            .record_decision(addr(1), ComplianceId::new(2), Decision::Accepted)
            .unwrap();

        let result = registry.record_decision(addr(1), ComplianceId::new(2), Decision::Declined);
        assert_eq!(
            result,
            Err(ComplianceError::AlreadyDecided {
                holder: addr(1),
                round: ComplianceId::new(2),
                decision: Decision::Accepted,
            })
        );
        assert_eq!(registry.decision_of(&addr(1), ComplianceId::new(2)), Decision::Accepted);
    }

    #[test]
    fn test_decisions_do_not_leak_across_rounds() {
        let mut registry = HolderRegistry::new();
        registry.register(addr(1), ComplianceId::new(1));
        registry
            .record_decision(addr(1), ComplianceId::new(2), Decision::Declined)
            .unwrap();

        assert_eq!(registry.decision_of(&addr(1), ComplianceId::new(3)), Decision::None);
        assert!(registry.check_decision(&addr(1), ComplianceId::new(3)).is_ok());
    }

    #[test]
    fn test_unregistered_holder_cannot_decide() {
        let mut registry = HolderRegistry::new();
        let result = registry.record_decision(addr(4), ComplianceId::new(2), Decision::Accepted);
        assert_eq!(result, Err(ComplianceError::NotAHolder(addr(4))));
    }
}
