//! Flat-file persistence: the roster of customers and one append-only file per account.

pub mod layout;
pub mod roster;
pub mod transaction_log;

pub use layout::DataLayout;
pub use roster::{RosterFile, RosterRecord};
pub use transaction_log::{LoadReport, SkippedLine, TransactionLog};
