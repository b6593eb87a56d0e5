//! Error taxonomy shared by every layer of the agreement ledger.

use std::fmt;

/// Coarse classification of a failure, stable across error message changes.
///
/// Callers match on the kind; the accompanying `Display` text is for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operation called with the wrong number of positional arguments.
    InvalidArgumentCount,
    /// Operation name not recognized on the entry point it was sent to.
    UnknownOperation,
    /// Create attempted with an identifier no record can be stored under.
    InvalidIdentifier,
    /// Create attempted on an identifier that already has a live record.
    AlreadyExists,
    /// The referenced agreement has no live record.
    NotFound,
    /// A ledger `get` failed.
    LedgerReadFailure,
    /// A ledger `put` or `delete` failed.
    LedgerWriteFailure,
    /// Stored bytes are not a valid record or index encoding.
    DecodeFailure,
    /// Dispatch fault that is not the caller's doing.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgumentCount => "InvalidArgumentCount",
            Self::UnknownOperation => "UnknownOperation",
            Self::InvalidIdentifier => "InvalidIdentifier",
            Self::AlreadyExists => "AlreadyExists",
            Self::NotFound => "NotFound",
            Self::LedgerReadFailure => "LedgerReadFailure",
            Self::LedgerWriteFailure => "LedgerWriteFailure",
            Self::DecodeFailure => "DecodeFailure",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
