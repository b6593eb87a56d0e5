//! Call classification: converts a raw `(name, args)` call into a typed `Operation`.

use std::sync::atomic::{AtomicU64, Ordering};

use agreement_core::{Agreement, AgreementField};

use super::operation::{ClassifyError, EntryMode, Operation, OperationContext, OperationKind};

// ---------------------------------------------------------------------------
// OperationService
// ---------------------------------------------------------------------------

/// Classifies incoming calls into typed `Operation` variants.
///
/// This is the single place arity is enforced: a call whose argument count
/// differs from [`OperationKind::arity`] never becomes an `Operation`, so no
/// handler (and no ledger access) runs for it.
pub struct OperationService {
    call_id_counter: AtomicU64,
}

impl OperationService {
    #[must_use]
    pub fn new() -> Self {
        Self {
            call_id_counter: AtomicU64::new(1),
        }
    }

    fn next_call_id(&self) -> u64 {
        self.call_id_counter.fetch_add(1, Ordering::Relaxed)
    }

    /// Classify a call received on `entry` into an `Operation`.
    ///
    /// # Errors
    ///
    /// - `ClassifyError::UnknownOperation` if `name` is not an operation of
    ///   `entry`
    /// - `ClassifyError::InvalidArgumentCount` if `args` has the wrong length
    pub fn classify(
        &self,
        entry: EntryMode,
        name: &str,
        args: Vec<String>,
    ) -> Result<Operation, ClassifyError> {
        let kind = OperationKind::lookup(entry, name).ok_or_else(|| {
            ClassifyError::UnknownOperation {
                entry,
                name: name.to_string(),
            }
        })?;

        if args.len() != kind.arity() {
            return Err(arity_error(kind, args.len()));
        }

        let ctx = OperationContext::new(self.next_call_id(), kind);
        let operation = match kind {
            OperationKind::Init => Operation::Init {
                ctx,
                seed: single(args),
            },
            OperationKind::CreateAgreement => Operation::CreateAgreement {
                ctx,
                agreement: agreement(kind, args)?,
            },
            OperationKind::UpdateAgreement => Operation::UpdateAgreement {
                ctx,
                agreement: agreement(kind, args)?,
            },
            OperationKind::DeleteAgreement => Operation::DeleteAgreement {
                ctx,
                agreement_id: single(args),
            },
            OperationKind::GetAgreementById => Operation::GetAgreement {
                ctx,
                agreement_id: single(args),
            },
            OperationKind::GetAgreementsByLender => Operation::FindAgreements {
                ctx,
                field: AgreementField::LenderName,
                value: single(args),
            },
            OperationKind::GetAgreementsByBorrower => Operation::FindAgreements {
                ctx,
                field: AgreementField::BorrowerName,
                value: single(args),
            },
            OperationKind::GetAllAgreements => Operation::ListAgreements { ctx },
        };
        Ok(operation)
    }
}

impl Default for OperationService {
    fn default() -> Self {
        Self::new()
    }
}

fn arity_error(kind: OperationKind, actual: usize) -> ClassifyError {
    ClassifyError::InvalidArgumentCount {
        operation: kind.name(),
        expected: kind.arity(),
        actual,
    }
}

/// First argument of a call already checked to have arity 1.
fn single(args: Vec<String>) -> String {
    args.into_iter().next().unwrap_or_default()
}

fn agreement(kind: OperationKind, args: Vec<String>) -> Result<Agreement, ClassifyError> {
    Agreement::try_from(args).map_err(|rejected| arity_error(kind, rejected.len()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
