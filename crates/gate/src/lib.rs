//! CompliantToken Transfer Gate - Pre-transfer gatekeeper
//!
//! The gate decides whether a transfer may happen BEFORE any balance moves.
//! It only reads compliance state; it never records anything.

pub mod engine;
pub mod error;

pub use engine::{Authorization, TransferGate};
pub use error::GateError;
