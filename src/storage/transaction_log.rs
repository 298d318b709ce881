use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{
    errors::{BankError, Result},
    ledger::Transaction,
};

/// A stored line that could not be parsed and was left out of the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub content: String,
    pub reason: String,
}

/// Outcome of reading an account file.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedLine>,
}

/// Append-only transaction file backing a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every parsable line in file order. A missing file is an empty history.
    pub fn load(&self) -> Result<LoadReport> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(LoadReport::default()),
            Err(err) => return Err(BankError::persistence("read transactions from", &self.path, err)),
        };

        let mut report = LoadReport::default();
        for (idx, line) in data.lines().enumerate() {
            match Transaction::parse_line(line) {
                Ok(txn) => report.transactions.push(txn),
                Err(err) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = idx + 1,
                        "skipping malformed transaction line: {err}"
                    );
                    report.skipped.push(SkippedLine {
                        line_number: idx + 1,
                        content: line.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(report)
    }

    /// Appends one newline-terminated record, creating the parent directory when absent.
    pub fn append(&self, transaction: &Transaction) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| BankError::persistence("create directory", parent, err))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| BankError::persistence("open", &self.path, err))?;
        let line = transaction.to_line();
        writeln!(file, "{line}")
            .and_then(|_| file.flush())
            .map_err(|err| BankError::persistence("append transaction to", &self.path, err))?;
        tracing::debug!(path = %self.path.display(), "{line}");
        Ok(())
    }

    /// Removes the file. Absence is not an error.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(BankError::persistence("delete", &self.path, err)),
        }
    }
}
