//! CompliantToken - regulated fungible token
//!
//! A mint-only balance ledger whose transfers are gated by a compliance
//! signoff protocol. Whenever the issuer proposes a new compliance version,
//! every holder must accept or decline it, and until then:
//!
//! - holders who have not answered cannot transfer at all
//! - holders who declined can only send tokens back to the issuer
//! - holders who accepted can only send to other holders who accepted
//!
//! [`CompliantToken`] is the single entry point. Each method is one atomic
//! step: it either applies completely or fails without changing anything.

pub mod config;
pub mod error;
pub mod operation;
pub mod token;

pub use config::TokenConfig;
pub use error::{ErrorKind, TokenError};
pub use operation::{Operation, Outcome};
pub use token::{CompliantToken, HolderSummary};

pub use ctoken_compliance::{Decision, RoundOpened, RoundState};
pub use ctoken_core::{Address, Amount, ComplianceId};
pub use ctoken_gate::Authorization;
