//! Application context - wires token, journal and config together

use ctoken_journal::{replay, JournalError, JournalReader, JournalRecord, JournalStore, KeySigner, GENESIS_HASH};
use ctoken_token::{CompliantToken, Operation, Outcome, TokenConfig, TokenError};
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_FILE: &str = "token.json";
const JOURNAL_DIR: &str = "journal";

/// Application context
pub struct AppContext {
    pub token: CompliantToken,
    store: JournalStore,
    journal_path: PathBuf,
    last_sequence: u64,
    last_hash: String,
}

impl AppContext {
    /// Deploy a new token into an empty data directory
    pub fn init(data_path: impl AsRef<Path>, config: TokenConfig) -> Result<Self, anyhow::Error> {
        let data_path = data_path.as_ref();
        let config_path = data_path.join(CONFIG_FILE);
        if config_path.exists() {
            anyhow::bail!("Token already initialized at {}", data_path.display());
        }

        let token = CompliantToken::new(config)?;
        std::fs::create_dir_all(data_path)?;
        token.config().write_to(&config_path)?;

        let journal_path = data_path.join(JOURNAL_DIR);
        Ok(Self {
            token,
            store: JournalStore::new(&journal_path)?,
            journal_path,
            last_sequence: 0,
            last_hash: GENESIS_HASH.to_string(),
        })
    }

    /// Load the config and replay the journal
    pub fn open(data_path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let data_path = data_path.as_ref();
        let config_path = data_path.join(CONFIG_FILE);
        if !config_path.exists() {
            anyhow::bail!(
                "No token at {} (run `ctoken init` first)",
                data_path.display()
            );
        }
        let config = TokenConfig::from_file(&config_path)?;

        let journal_path = data_path.join(JOURNAL_DIR);
        let records = JournalReader::from_directory(&journal_path)?.read_all()?;
        let token = replay(config, &records)?;

        let (last_sequence, last_hash) = match records.last() {
            Some(last) => (last.sequence, last.hash.clone()),
            None => (0, GENESIS_HASH.to_string()),
        };

        Ok(Self {
            token,
            store: JournalStore::new(&journal_path)?,
            journal_path,
            last_sequence,
            last_hash,
        })
    }

    /// Commit an operation signed by `signer`
    ///
    /// Flow: Apply (staged copy) → Seal (hash + sign) → Append → Swap in.
    /// A rejected operation is never journaled, and a failed append leaves
    /// the in-memory token untouched.
    pub fn commit(
        &mut self,
        operation: Operation,
        signer: &KeySigner,
    ) -> Result<(JournalRecord, Outcome), CommitError> {
        let signer_address = signer.address();
        if *operation.caller() != signer_address {
            return Err(CommitError::CallerMismatch {
                caller: operation.caller().to_string(),
                signer: signer_address.to_string(),
            });
        }

        let mut staged = self.token.clone();
        let outcome = staged.apply(&operation)?;

        let sequence = self.last_sequence + 1;
        let record = JournalRecord::seal(sequence, self.last_hash.clone(), operation, signer)?;
        self.store.append(&record)?;

        self.token = staged;
        self.last_sequence = record.sequence;
        self.last_hash = record.hash.clone();

        info!(sequence, op = record.operation.name(), "committed");
        Ok((record, outcome))
    }

    /// Journal directory inside a data directory
    pub fn journal_dir(data_path: &Path) -> PathBuf {
        data_path.join(JOURNAL_DIR)
    }

    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }

    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }
}

/// Errors during commit
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error("Operation rejected: {0}")]
    Rejected(#[from] TokenError),

    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    #[error("Operation caller {caller} does not match signing key {signer}")]
    CallerMismatch { caller: String, signer: String },
}
