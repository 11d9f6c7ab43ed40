pub mod client;
pub mod dedup;
pub mod wire;

pub use client::{LedgerClient, LedgerError, LedgerSync};
pub use dedup::find_duplicate;
