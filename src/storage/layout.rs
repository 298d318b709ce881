use std::path::{Path, PathBuf};

use crate::ledger::AccountKind;

const ROSTER_FILE: &str = "customers.txt";
const ACCOUNT_FILE_EXTENSION: &str = "txt";

/// Resolves every on-disk location from a single data root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the customer roster, one customer per line.
    pub fn roster_path(&self) -> PathBuf {
        self.root.join(ROSTER_FILE)
    }

    /// Directory holding every account file of the given kind.
    pub fn account_dir(&self, kind: AccountKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Transaction file for one account, e.g. `<root>/savings/aj-12-01-10.txt`.
    pub fn account_path(&self, kind: AccountKind, account_number: &str) -> PathBuf {
        self.account_dir(kind)
            .join(format!("{account_number}.{ACCOUNT_FILE_EXTENSION}"))
    }
}
