//! JSONL journal reader - sequential reader for replay

use crate::error::JournalError;
use crate::record::JournalRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub struct JournalReader {
    files: Vec<PathBuf>,
}

impl JournalReader {
    /// Collect the `.jsonl` files of a directory (missing directory = empty journal)
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, JournalError> {
        let path = path.as_ref();
        let mut files = Vec::new();

        if path.exists() {
            for entry in std::fs::read_dir(path)? {
                let file_path = entry?.path();
                if file_path.extension().is_some_and(|ext| ext == "jsonl") {
                    files.push(file_path);
                }
            }
        }

        files.sort();

        Ok(Self { files })
    }

    /// Read all records from all files in order
    pub fn read_all(&self) -> Result<Vec<JournalRecord>, JournalError> {
        let mut records = Vec::new();

        for file_path in &self.files {
            let reader = BufReader::new(File::open(file_path)?);

            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                records.push(serde_json::from_str(&line)?);
            }
        }

        Ok(records)
    }

    pub fn last_record(&self) -> Result<Option<JournalRecord>, JournalError> {
        Ok(self.read_all()?.pop())
    }

    pub fn count(&self) -> Result<usize, JournalError> {
        let mut count = 0;

        for file_path in &self.files {
            let reader = BufReader::new(File::open(file_path)?);
            for line in reader.lines() {
                if !line?.trim().is_empty() {
                    count += 1;
                }
            }
        }

        Ok(count)
    }
}
