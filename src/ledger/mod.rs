//! Customer, account, and transaction models.

pub mod account;
pub mod customer;
pub mod identity;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use customer::Customer;
pub use identity::{derive_identity, AccountIdentity};
pub use transaction::{LineError, Transaction, TransactionAction};
