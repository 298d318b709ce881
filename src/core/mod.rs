pub mod bank_directory;
pub mod clock;

pub use bank_directory::BankDirectory;
pub use clock::{Clock, FixedClock, SystemClock};
