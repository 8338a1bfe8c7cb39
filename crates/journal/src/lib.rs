//! CompliantToken Journal - append-only operation log
//!
//! Every successful operation is stored as one [`JournalRecord`] line in a
//! JSONL file. Records form a SHA-256 hash chain starting at `"GENESIS"` and
//! carry an Ed25519 signature from the caller, whose derived address must
//! match the operation's caller. Replaying the journal rebuilds the token.

pub mod error;
pub mod hash;
pub mod reader;
pub mod record;
pub mod replay;
pub mod signature;
pub mod store;

pub use error::JournalError;
pub use hash::{calculate_record_hash, verify_chain, ChainError, GENESIS_HASH};
pub use reader::JournalReader;
pub use record::JournalRecord;
pub use replay::replay;
pub use signature::{KeySigner, RecordSignature, SignablePayload};
pub use store::JournalStore;
