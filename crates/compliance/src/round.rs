//! Compliance round state
//!
//! Invariants:
//! - `pending.is_some() ⇒ pending > current`
//! - `sign_off_count + decline_count <= total_holders`

use ctoken_core::ComplianceId;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Whether a round is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundState {
    Settled,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceRound {
    current: ComplianceId,
    pending: Option<ComplianceId>,
    /// Holders eligible to decide in the pending round
    total_holders: usize,
    sign_off_count: usize,
    decline_count: usize,
}

impl ComplianceRound {
    pub fn new(initial: ComplianceId) -> Self {
        Self {
            current: initial,
            pending: None,
            total_holders: 0,
            sign_off_count: 0,
            decline_count: 0,
        }
    }

    pub fn current(&self) -> ComplianceId {
        self.current
    }

    pub fn pending(&self) -> Option<ComplianceId> {
        self.pending
    }

    pub fn state(&self) -> RoundState {
        if self.pending.is_some() {
            RoundState::Pending
        } else {
            RoundState::Settled
        }
    }

    pub fn total_holders(&self) -> usize {
        self.total_holders
    }

    pub fn sign_off_count(&self) -> usize {
        self.sign_off_count
    }

    pub fn decline_count(&self) -> usize {
        self.decline_count
    }

    /// Every eligible holder has decided one way or the other
    pub fn is_complete(&self) -> bool {
        self.pending.is_some() && self.sign_off_count + self.decline_count == self.total_holders
    }

    /// Smallest id a new round must strictly exceed
    pub(crate) fn floor(&self) -> ComplianceId {
        self.pending.unwrap_or(self.current)
    }

    /// Open a round for `id` with `eligible` holders.
    ///
    /// A still-pending round is superseded and its id becomes current; the
    /// superseded id is returned. The caller validated `id > floor()`.
    pub(crate) fn open(&mut self, id: ComplianceId, eligible: usize) -> Option<ComplianceId> {
        let superseded = self.pending.take();
        if let Some(previous) = superseded {
            self.current = previous;
        }

        self.sign_off_count = 0;
        self.decline_count = 0;
        if eligible == 0 {
            self.current = id;
            self.total_holders = 0;
        } else {
            self.pending = Some(id);
            self.total_holders = eligible;
        }
        superseded
    }

    /// A holder registered mid-round joins the pending round
    pub(crate) fn enroll(&mut self) {
        if self.pending.is_some() {
            self.total_holders += 1;
        }
    }

    pub(crate) fn record_sign_off(&mut self) {
        self.sign_off_count += 1;
    }

    pub(crate) fn record_decline(&mut self) {
        self.decline_count += 1;
    }
}
