//! `LedgerPort` implementations.
//!
//! [`MemoryLedger`] keeps everything in process memory; [`RedbLedger`]
//! persists to a single redb file.

mod memory;
#[cfg(feature = "redb")]
mod redb_ledger;

pub use memory::MemoryLedger;
#[cfg(feature = "redb")]
pub use redb_ledger::RedbLedger;
