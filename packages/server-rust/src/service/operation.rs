//! Typed operations, their declared arities, and dispatch errors.

use std::fmt;

use agreement_core::{Agreement, AgreementField};

use crate::error::ErrorKind;
use crate::storage::StoreError;

/// Names of the domain services operations are routed to.
pub mod service_names {
    /// Mutating operations: initialize, create, update, delete.
    pub const AGREEMENT: &str = "agreement";
    /// Read-only operations: lookups and scans.
    pub const QUERY: &str = "query";
}

/// Which external entry point a call arrived through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// Mutating entry point (`invoke`, and `setup` via `init`).
    Invoke,
    /// Read-only entry point (`query`).
    Query,
}

impl fmt::Display for EntryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invoke => f.write_str("invocation"),
            Self::Query => f.write_str("query"),
        }
    }
}

/// Every operation the ledger understands, with its wire name and arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Init,
    CreateAgreement,
    UpdateAgreement,
    DeleteAgreement,
    GetAgreementById,
    GetAgreementsByLender,
    GetAgreementsByBorrower,
    GetAllAgreements,
}

impl OperationKind {
    /// All operations, invoke path first.
    pub const ALL: [OperationKind; 8] = [
        Self::Init,
        Self::CreateAgreement,
        Self::UpdateAgreement,
        Self::DeleteAgreement,
        Self::GetAgreementById,
        Self::GetAgreementsByLender,
        Self::GetAgreementsByBorrower,
        Self::GetAllAgreements,
    ];

    /// Operation name as sent by the external runtime.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::CreateAgreement => "create_agreement",
            Self::UpdateAgreement => "update_po",
            Self::DeleteAgreement => "delete_po",
            Self::GetAgreementById => "getAgreement_byID",
            Self::GetAgreementsByLender => "getAgreement_byBuyer",
            Self::GetAgreementsByBorrower => "getAgreement_bySeller",
            Self::GetAllAgreements => "get_AllAgreement",
        }
    }

    /// Exact number of positional arguments the operation takes.
    ///
    /// `get_AllAgreement` takes one argument and ignores it.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::CreateAgreement | Self::UpdateAgreement => agreement_core::FIELD_COUNT,
            Self::Init
            | Self::DeleteAgreement
            | Self::GetAgreementById
            | Self::GetAgreementsByLender
            | Self::GetAgreementsByBorrower
            | Self::GetAllAgreements => 1,
        }
    }

    /// Entry point the operation is reachable through.
    #[must_use]
    pub fn entry(self) -> EntryMode {
        match self {
            Self::Init | Self::CreateAgreement | Self::UpdateAgreement | Self::DeleteAgreement => {
                EntryMode::Invoke
            }
            Self::GetAgreementById
            | Self::GetAgreementsByLender
            | Self::GetAgreementsByBorrower
            | Self::GetAllAgreements => EntryMode::Query,
        }
    }

    /// Domain service that executes the operation.
    #[must_use]
    pub fn service_name(self) -> &'static str {
        match self.entry() {
            EntryMode::Invoke => service_names::AGREEMENT,
            EntryMode::Query => service_names::QUERY,
        }
    }

    /// Resolves `name` on the given entry point.
    ///
    /// Names are only recognized on their own entry point: a query name sent
    /// to `invoke` is unknown there.
    #[must_use]
    pub fn lookup(entry: EntryMode, name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.entry() == entry && kind.name() == name)
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Context carried with every operation through the pipeline.
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub call_id: u64,
    pub kind: OperationKind,
    pub service_name: &'static str,
}

impl OperationContext {
    #[must_use]
    pub fn new(call_id: u64, kind: OperationKind) -> Self {
        Self {
            call_id,
            kind,
            service_name: kind.service_name(),
        }
    }
}

/// Typed operation variants dispatched through the pipeline.
#[derive(Debug)]
pub enum Operation {
    /// Write the diagnostic seed and reset the index.
    Init { ctx: OperationContext, seed: String },
    CreateAgreement {
        ctx: OperationContext,
        agreement: Agreement,
    },
    /// `agreement.agreement_id` selects the record; every other field is the
    /// new value.
    UpdateAgreement {
        ctx: OperationContext,
        agreement: Agreement,
    },
    DeleteAgreement {
        ctx: OperationContext,
        agreement_id: String,
    },
    GetAgreement {
        ctx: OperationContext,
        agreement_id: String,
    },
    /// Scan filtered by exact equality on one field.
    FindAgreements {
        ctx: OperationContext,
        field: AgreementField,
        value: String,
    },
    ListAgreements { ctx: OperationContext },
}

impl Operation {
    #[must_use]
    pub fn ctx(&self) -> &OperationContext {
        match self {
            Self::Init { ctx, .. }
            | Self::CreateAgreement { ctx, .. }
            | Self::UpdateAgreement { ctx, .. }
            | Self::DeleteAgreement { ctx, .. }
            | Self::GetAgreement { ctx, .. }
            | Self::FindAgreements { ctx, .. }
            | Self::ListAgreements { ctx } => ctx,
        }
    }
}

/// Successful response from an operation handler.
#[derive(Debug, PartialEq, Eq)]
pub enum OperationResponse {
    /// Mutation applied; nothing to return.
    Ack { call_id: u64 },
    /// Query result bytes.
    Payload { call_id: u64, bytes: Vec<u8> },
}

impl OperationResponse {
    /// Bytes handed back to the external runtime; empty for an `Ack`.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Ack { .. } => Vec::new(),
            Self::Payload { bytes, .. } => bytes,
        }
    }
}

/// Errors from turning a raw `(name, args)` call into an `Operation`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifyError {
    #[error("Incorrect number of arguments for {operation}. Expecting {expected}, got {actual}")]
    InvalidArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Received unknown function {entry}: {name}")]
    UnknownOperation { entry: EntryMode, name: String },
}

/// Errors returned to the external runtime.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error(transparent)]
    Classify(#[from] ClassifyError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown service: {name}")]
    UnknownService { name: String },
    #[error("operation {operation} sent to the wrong service")]
    WrongService { operation: &'static str },
}

impl OperationError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Classify(ClassifyError::InvalidArgumentCount { .. }) => {
                ErrorKind::InvalidArgumentCount
            }
            Self::Classify(ClassifyError::UnknownOperation { .. }) => ErrorKind::UnknownOperation,
            Self::Store(err) => err.kind(),
            Self::UnknownService { .. } | Self::WrongService { .. } => ErrorKind::Internal,
        }
    }
}
