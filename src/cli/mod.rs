//! Command shell over the bank directory: interactive (rustyline) or scripted (stdin).

pub mod context;
pub mod output;
mod shell;

use std::io;

use thiserror::Error;

use crate::errors::BankError;

pub use context::{Session, ShellContext};
pub use shell::run_cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Line editor failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Failures of a single command; reported and the loop continues.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Denied(String),
    #[error(transparent)]
    Bank(#[from] BankError),
}
