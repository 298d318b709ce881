#![doc(test(attr(deny(warnings))))]

//! Bank Ledger keeps customers, their savings and current accounts, and every
//! lodgement or withdrawal in plain tab-separated text files.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::BankDirectory;
pub use errors::{BankError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Bank Ledger tracing initialized.");
    });
}
