//! CompliantToken Balance Ledger
//!
//! Holds every holder's balance and the total supply. Issuance is the only
//! way tokens enter circulation; there is no burn path, so the sum of all
//! balances always equals the total issued.
//!
//! The ledger never decides *whether* a movement is allowed. The transfer
//! gate authorizes first, then calls [`BalanceLedger::transfer`].

pub mod balance;
pub mod error;

pub use balance::BalanceLedger;
pub use error::LedgerError;
