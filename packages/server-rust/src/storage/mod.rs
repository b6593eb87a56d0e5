//! Ledger-backed storage for agreements.
//!
//! Layers, innermost first:
//!
//! - [`LedgerPort`]: external single-key get/put/delete store
//! - [`IndexStore`]: the one ledger value listing every live identifier
//! - [`AgreementStore`]: record create/read/update/delete, keeping the index
//!   in step
//! - [`QueryEngine`]: index scans with optional field filtering

pub mod error;
pub mod index;
pub mod ledger;
pub mod ledgers;
pub mod query;
pub mod record_store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::StoreError;
pub use index::IndexStore;
pub use ledger::LedgerPort;
pub use query::QueryEngine;
pub use record_store::AgreementStore;
