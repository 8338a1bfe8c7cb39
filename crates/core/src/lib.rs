//! CompliantToken Core - Domain types
//!
//! This crate contains the fundamental types shared by every other crate:
//! - `Address`: 20-byte holder identity derived from a public key
//! - `Amount`: Non-negative base-unit token quantity
//! - `ComplianceId`: Compliance-version identifier issued by the document registry

pub mod address;
pub mod amount;
pub mod compliance_id;

pub use address::{Address, AddressError};
pub use amount::{Amount, AmountError, DEFAULT_DECIMALS};
pub use compliance_id::ComplianceId;
