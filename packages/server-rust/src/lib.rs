//! Agreement ledger: agreement records kept on a key-value ledger, with an
//! index of live identifiers, field-filtered scans, and a dispatch layer
//! that turns named calls into typed operations.

pub mod agreement_ledger;
pub mod config;
pub mod error;
pub mod service;
pub mod storage;

pub use agreement_ledger::AgreementLedger;
pub use config::LedgerConfig;
pub use error::ErrorKind;
pub use service::{ClassifyError, EntryMode, OperationError};
pub use storage::{LedgerPort, StoreError};
