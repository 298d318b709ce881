use std::{io, path::Path};

use thiserror::Error;

/// Error type that captures common banking failures.
#[derive(Debug, Error)]
pub enum BankError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Persistence error: {context}: {source}")]
    Persistence {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("Malformed roster line {line}: {reason}")]
    MalformedRoster { line: usize, reason: String },
    #[error("Account number `{account_number}` is already held by {existing_email}")]
    AccountNumberCollision {
        account_number: String,
        existing_email: String,
    },
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, BankError>;

impl BankError {
    pub(crate) fn persistence(action: &str, path: &Path, source: io::Error) -> Self {
        BankError::Persistence {
            context: format!("failed to {action} `{}`", path.display()),
            source,
        }
    }

    /// True for failures caused by caller input rather than the environment.
    pub fn is_validation(&self) -> bool {
        matches!(self, BankError::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for BankError {
    fn from(err: serde_json::Error) -> Self {
        BankError::Config(err.to_string())
    }
}
