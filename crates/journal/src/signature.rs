//! Caller signatures for journal records
//!
//! Each record is signed by the key of the identity that submitted the
//! operation. The holder address is derived from the public key, so a valid
//! signature also proves who the caller was.

use chrono::{DateTime, Utc};
use ctoken_core::Address;
use ctoken_token::Operation;
use ed25519_dalek::{Signature, Signer as DalekSigner, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::error::JournalError;
use crate::record::JournalRecord;

/// Ed25519 signature attached to a journal record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSignature {
    /// Public key (hex-encoded)
    pub public_key: String,

    /// Signature bytes (hex-encoded)
    pub signature: String,

    pub signed_at: DateTime<Utc>,
}

impl RecordSignature {
    /// Verify against `payload` and return the signer's address
    pub fn verify(&self, sequence: u64, payload: &[u8]) -> Result<Address, JournalError> {
        let invalid = |reason: String| JournalError::InvalidSignature { sequence, reason };

        let pk_bytes = hex::decode(&self.public_key)
            .map_err(|e| invalid(format!("Invalid public key hex: {}", e)))?;
        let sig_bytes = hex::decode(&self.signature)
            .map_err(|e| invalid(format!("Invalid signature hex: {}", e)))?;

        let pk_array: [u8; 32] = pk_bytes
            .try_into()
            .map_err(|_| invalid("Public key must be 32 bytes".to_string()))?;
        let sig_array: [u8; 64] = sig_bytes
            .try_into()
            .map_err(|_| invalid("Signature must be 64 bytes".to_string()))?;

        let verifying_key = VerifyingKey::from_bytes(&pk_array)
            .map_err(|e| invalid(format!("Invalid public key: {}", e)))?;
        let signature = Signature::from_bytes(&sig_array);

        verifying_key
            .verify(payload, &signature)
            .map_err(|e| invalid(format!("Verification failed: {}", e)))?;

        Ok(Address::from_public_key(&pk_array))
    }
}

/// Deterministic representation of a record for signing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignablePayload {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub id: Uuid,
    pub operation: Operation,
    pub prev_hash: String,
    pub hash: String,
    pub signed_at: DateTime<Utc>,
}

impl SignablePayload {
    pub fn from_record(record: &JournalRecord, signed_at: DateTime<Utc>) -> Self {
        Self {
            sequence: record.sequence,
            timestamp: record.timestamp,
            id: record.id,
            operation: record.operation.clone(),
            prev_hash: record.prev_hash.clone(),
            hash: record.hash.clone(),
            signed_at,
        }
    }

    /// Canonical JSON bytes for signing
    pub fn to_bytes(&self) -> Result<Vec<u8>, JournalError> {
        Ok(serde_json::to_vec(self)?)
    }
}

/// Ed25519 key of a token participant
pub struct KeySigner {
    signing_key: SigningKey,
}

impl KeySigner {
    /// Create from a hex-encoded 32-byte seed
    pub fn from_hex(hex_seed: &str) -> Result<Self, JournalError> {
        let bytes = hex::decode(hex_seed.trim())
            .map_err(|e| JournalError::InvalidKey(format!("Invalid key hex: {}", e)))?;

        let seed: [u8; 32] = bytes
            .try_into()
            .map_err(|_| JournalError::InvalidKey("Key must be 32 bytes".to_string()))?;

        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Load a seed written by [`KeySigner::write_to`]
    pub fn from_file(path: &Path) -> Result<Self, JournalError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_hex(&content)
    }

    /// Generate a new random signing key
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Export the seed as hex (for storage)
    pub fn seed_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }

    pub fn write_to(&self, path: &Path) -> Result<(), JournalError> {
        std::fs::write(path, self.seed_hex())?;
        Ok(())
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    /// Holder address of this key
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, record: &JournalRecord) -> Result<RecordSignature, JournalError> {
        let signed_at = Utc::now();
        let payload = SignablePayload::from_record(record, signed_at).to_bytes()?;
        let signature = self.signing_key.sign(&payload);

        Ok(RecordSignature {
            public_key: self.public_key_hex(),
            signature: hex::encode(signature.to_bytes()),
            signed_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::GENESIS_HASH;
    use ctoken_token::Amount;
    use tempfile::tempdir;

    fn issue_by(signer: &KeySigner) -> Operation {
        Operation::Issue {
            caller: signer.address(),
            holder: Address::from_bytes([1; 20]),
            amount: Amount::new(100),
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = KeySigner::generate();
        let record = JournalRecord::seal(1, GENESIS_HASH, issue_by(&signer), &signer).unwrap();

        assert!(record.verify_signature().is_ok());
        assert_eq!(record.signature.public_key, signer.public_key_hex());
    }

    #[test]
    fn test_seed_roundtrip() {
        let signer = KeySigner::generate();
        let signer2 = KeySigner::from_hex(&signer.seed_hex()).unwrap();
        assert_eq!(signer.address(), signer2.address());
    }

    #[test]
    fn test_key_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("holder.key");
        let signer = KeySigner::generate();

        signer.write_to(&path).unwrap();
        assert_eq!(KeySigner::from_file(&path).unwrap().address(), signer.address());
    }

    #[test]
    fn test_invalid_seed() {
        assert!(matches!(KeySigner::from_hex("zz"), Err(JournalError::InvalidKey(_))));
        assert!(matches!(KeySigner::from_hex("abcd"), Err(JournalError::InvalidKey(_))));
    }

    #[test]
    fn test_tampered_record_fails_verification() {
        let signer = KeySigner::generate();
        let mut record = JournalRecord::seal(1, GENESIS_HASH, issue_by(&signer), &signer).unwrap();

        record.sequence = 999;

        assert!(matches!(
            record.verify_signature(),
            Err(JournalError::InvalidSignature { sequence: 999, .. })
        ));
    }

    #[test]
    fn test_signer_must_be_caller() {
        let issuer = KeySigner::generate();
        let impostor = KeySigner::generate();

        let record = JournalRecord::seal(1, GENESIS_HASH, issue_by(&issuer), &impostor).unwrap();

        assert!(matches!(
            record.verify_signature(),
            Err(JournalError::SignerMismatch { .. })
        ));
    }
}
