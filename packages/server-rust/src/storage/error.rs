//! Errors raised by the storage layer.

use crate::error::ErrorKind;

/// Failure of an index, record, or query operation against the ledger.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("agreement identifier must not be empty")]
    EmptyIdentifier,

    #[error("agreement {id} already exists")]
    AlreadyExists { id: String },

    #[error("agreement {id} not found")]
    NotFound { id: String },

    #[error("Failed to get state for {key}")]
    LedgerRead {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write state for {key}")]
    LedgerWrite {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("value stored under {key} is not a valid encoding")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyIdentifier => ErrorKind::InvalidIdentifier,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::LedgerRead { .. } => ErrorKind::LedgerReadFailure,
            Self::LedgerWrite { .. } => ErrorKind::LedgerWriteFailure,
            Self::Decode { .. } | Self::Encode { .. } => ErrorKind::DecodeFailure,
        }
    }
}
