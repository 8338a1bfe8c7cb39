//! JSONL journal store - append-only writer

use crate::error::JournalError;
use crate::record::JournalRecord;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Append-only JSONL store, one file per UTC day
pub struct JournalStore {
    base_path: PathBuf,
    current_file: Option<BufWriter<File>>,
    current_date: Option<String>,
}

impl JournalStore {
    /// Create a new store at the given directory
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;

        Ok(Self {
            base_path,
            current_file: None,
            current_date: None,
        })
    }

    /// Append a record and flush it to disk
    pub fn append(&mut self, record: &JournalRecord) -> Result<(), JournalError> {
        let date = record.timestamp.format("%Y-%m-%d").to_string();

        if self.current_date.as_ref() != Some(&date) {
            self.rotate_file(&date)?;
        }

        if let Some(ref mut writer) = self.current_file {
            let json = serde_json::to_string(record)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }

        debug!(sequence = record.sequence, op = record.operation.name(), "record appended");
        Ok(())
    }

    fn rotate_file(&mut self, date: &str) -> Result<(), JournalError> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }

        let file_path = self.base_path.join(format!("{}.jsonl", date));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)?;

        self.current_file = Some(BufWriter::new(file));
        self.current_date = Some(date.to_string());

        Ok(())
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Flush and close the current file
    pub fn close(&mut self) -> Result<(), JournalError> {
        if let Some(ref mut writer) = self.current_file {
            writer.flush()?;
        }
        self.current_file = None;
        self.current_date = None;
        Ok(())
    }
}

impl Drop for JournalStore {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
