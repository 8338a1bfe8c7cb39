//! Journal record

use chrono::{DateTime, Utc};
use ctoken_token::Operation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::JournalError;
use crate::hash::calculate_record_hash;
use crate::signature::{KeySigner, RecordSignature, SignablePayload};

/// One committed operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Strictly increasing, starting at 1
    pub sequence: u64,

    /// Hash of the previous record, `"GENESIS"` for the first
    pub prev_hash: String,

    /// SHA-256 over every field except `hash` and `signature`
    pub hash: String,

    pub timestamp: DateTime<Utc>,

    /// Unique record id
    pub id: Uuid,

    pub operation: Operation,

    pub signature: RecordSignature,
}

impl JournalRecord {
    /// Build, hash and sign a record for `operation`
    pub fn seal(
        sequence: u64,
        prev_hash: impl Into<String>,
        operation: Operation,
        signer: &KeySigner,
    ) -> Result<Self, JournalError> {
        let mut record = Self {
            sequence,
            prev_hash: prev_hash.into(),
            hash: String::new(),
            timestamp: Utc::now(),
            id: Uuid::new_v4(),
            operation,
            signature: RecordSignature::default(),
        };
        record.hash = calculate_record_hash(&record);
        record.signature = signer.sign(&record)?;
        Ok(record)
    }

    /// Verify the signature and that the signer is the operation's caller
    pub fn verify_signature(&self) -> Result<(), JournalError> {
        let payload = SignablePayload::from_record(self, self.signature.signed_at);
        let signer = self.signature.verify(self.sequence, &payload.to_bytes()?)?;

        let caller = *self.operation.caller();
        if signer != caller {
            return Err(JournalError::SignerMismatch {
                sequence: self.sequence,
                signer,
                caller,
            });
        }
        Ok(())
    }
}
