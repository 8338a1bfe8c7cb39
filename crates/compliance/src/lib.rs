//! CompliantToken Compliance Engine
//!
//! Tracks which compliance version every holder has acknowledged and runs
//! the signoff protocol for new versions.
//!
//! ## Round lifecycle
//!
//! ```text
//!            open_round(id)
//! SETTLED ─────────────────────▶ PENDING ──┐ accept / decline
//!    ▲                              │  ▲    │ (once per holder per round)
//!    │ no holders registered        │  └────┘
//!    └──────────────────────────────┘
//!            open_round(id') supersedes: pending id becomes current
//! ```
//!
//! ## Key Components
//!
//! - [`registry::HolderRegistry`] - insertion-ordered holder set and per-round decisions
//! - [`round::ComplianceRound`] - current/pending ids and signoff counters
//! - [`engine::ComplianceEngine`] - keeps the two consistent

pub mod decision;
pub mod engine;
pub mod error;
pub mod registry;
pub mod round;

pub use decision::{Acknowledgment, Decision};
pub use engine::{ComplianceEngine, RoundOpened};
pub use error::{ComplianceError, ComplianceResult};
pub use registry::{HolderRecord, HolderRegistry};
pub use round::{ComplianceRound, RoundState};
