//! Rebuild token state from the journal

use ctoken_token::{CompliantToken, TokenConfig};
use tracing::info;

use crate::error::JournalError;
use crate::hash::verify_chain;
use crate::record::JournalRecord;

/// Verify `records` and apply them in order to a freshly deployed token.
///
/// Every record was a successful operation when committed, so any rejection
/// during replay means the journal does not belong to this config.
pub fn replay(config: TokenConfig, records: &[JournalRecord]) -> Result<CompliantToken, JournalError> {
    verify_chain(records)?;

    let mut token = CompliantToken::new(config).map_err(|source| JournalError::Replay {
        sequence: 0,
        source,
    })?;

    for record in records {
        record.verify_signature()?;
        token
            .apply(&record.operation)
            .map_err(|source| JournalError::Replay {
                sequence: record.sequence,
                source,
            })?;
    }

    info!(records = records.len(), holders = token.total_holders(), "journal replayed");
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::GENESIS_HASH;
    use crate::signature::KeySigner;
    use ctoken_token::{Address, Amount, ComplianceId, Operation};

    struct Chain {
        records: Vec<JournalRecord>,
    }

    impl Chain {
        fn push(&mut self, op: Operation, signer: &KeySigner) {
            let prev = self
                .records
                .last()
                .map(|r| r.hash.clone())
                .unwrap_or_else(|| GENESIS_HASH.to_string());
            let seq = self.records.len() as u64 + 1;
            self.records.push(JournalRecord::seal(seq, prev, op, signer).unwrap());
        }
    }

    fn config(issuer: Address) -> TokenConfig {
        TokenConfig::new("Compliant Token", "CTT", "registry", issuer)
            .with_initial_compliance_id(ComplianceId::new(1))
    }

    #[test]
    fn test_replay_rebuilds_state() {
        let issuer = KeySigner::generate();
        let holder = KeySigner::generate();
        let mut chain = Chain { records: vec![] };

        chain.push(
            Operation::Issue {
                caller: issuer.address(),
                holder: holder.address(),
                amount: Amount::new(1000),
            },
            &issuer,
        );
        chain.push(
            Operation::OpenRound {
                caller: issuer.address(),
                compliance_id: ComplianceId::new(2),
            },
            &issuer,
        );
        chain.push(Operation::Decline { caller: holder.address() }, &holder);
        chain.push(
            Operation::Transfer {
                caller: holder.address(),
                receiver: issuer.address(),
                amount: Amount::new(300),
            },
            &holder,
        );

        let token = replay(config(issuer.address()), &chain.records).unwrap();

        assert_eq!(token.balance_of(&holder.address()), Amount::new(700));
        assert_eq!(token.balance_of(&issuer.address()), Amount::new(300));
        assert_eq!(token.pending_compliance_id(), Some(ComplianceId::new(2)));
        assert_eq!(token.decline_count(), 1);
    }

    #[test]
    fn test_replay_rejects_forged_caller() {
        let issuer = KeySigner::generate();
        let forger = KeySigner::generate();
        let mut chain = Chain { records: vec![] };

        chain.push(
            Operation::Issue {
                caller: issuer.address(),
                holder: forger.address(),
                amount: Amount::new(1),
            },
            &forger,
        );

        assert!(matches!(
            replay(config(issuer.address()), &chain.records),
            Err(JournalError::SignerMismatch { sequence: 1, .. })
        ));
    }

    #[test]
    fn test_replay_rejects_foreign_journal() {
        let issuer = KeySigner::generate();
        let other_issuer = KeySigner::generate();
        let mut chain = Chain { records: vec![] };

        chain.push(
            Operation::Issue {
                caller: issuer.address(),
                holder: issuer.address(),
                amount: Amount::new(1),
            },
            &issuer,
        );

        assert!(matches!(
            replay(config(other_issuer.address()), &chain.records),
            Err(JournalError::Replay { sequence: 1, .. })
        ));
    }
}
