//! Journal errors

use ctoken_core::Address;
use ctoken_token::TokenError;
use thiserror::Error;

use crate::hash::ChainError;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid signature at seq {sequence}: {reason}")]
    InvalidSignature { sequence: u64, reason: String },

    #[error("Record {sequence} signed by {signer} but submitted by {caller}")]
    SignerMismatch {
        sequence: u64,
        signer: Address,
        caller: Address,
    },

    #[error("Hash chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Replay failed at seq {sequence}: {source}")]
    Replay {
        sequence: u64,
        #[source]
        source: TokenError,
    },
}
