//! Domain services.
//!
//! [`AgreementService`] executes the invoke path against the
//! [`AgreementStore`]; [`QueryService`] executes the query path against the
//! [`QueryEngine`]. Each is a `tower::Service<Operation>` and rejects
//! operations that belong to the other.

use std::sync::Arc;
use std::task::{Context, Poll};

use tower::Service;

use crate::service::operation::{Operation, OperationError, OperationResponse};
use crate::service::router::BoxedFuture;
use crate::storage::{AgreementStore, QueryEngine, StoreError};

// ---------------------------------------------------------------------------
// AgreementService
// ---------------------------------------------------------------------------

/// Mutating operations: `init`, `create_agreement`, `update_po`, `delete_po`.
#[derive(Clone)]
pub struct AgreementService {
    store: Arc<AgreementStore>,
}

impl AgreementService {
    #[must_use]
    pub fn new(store: Arc<AgreementStore>) -> Self {
        Self { store }
    }
}

impl Service<Operation> for AgreementService {
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let store = Arc::clone(&self.store);
        Box::pin(async move {
            let call_id = op.ctx().call_id;
            match op {
                Operation::Init { seed, .. } => store.initialize(&seed).await?,
                Operation::CreateAgreement { agreement, .. } => store.create(agreement).await?,
                Operation::UpdateAgreement { agreement, .. } => store.update(agreement).await?,
                Operation::DeleteAgreement { agreement_id, .. } => {
                    store.delete(&agreement_id).await?;
                }
                other => {
                    return Err(OperationError::WrongService {
                        operation: other.ctx().kind.name(),
                    })
                }
            }
            Ok(OperationResponse::Ack { call_id })
        })
    }
}

// ---------------------------------------------------------------------------
// QueryService
// ---------------------------------------------------------------------------

/// Read-only operations: `getAgreement_byID`, `getAgreement_byBuyer`,
/// `getAgreement_bySeller`, `get_AllAgreement`.
#[derive(Clone)]
pub struct QueryService {
    engine: Arc<QueryEngine>,
}

impl QueryService {
    #[must_use]
    pub fn new(engine: Arc<QueryEngine>) -> Self {
        Self { engine }
    }
}

impl Service<Operation> for QueryService {
    type Response = OperationResponse;
    type Error = OperationError;
    type Future = BoxedFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, op: Operation) -> Self::Future {
        let engine = Arc::clone(&self.engine);
        Box::pin(async move {
            let call_id = op.ctx().call_id;
            let operation = op.ctx().kind.name();
            let matches = match op {
                Operation::GetAgreement { agreement_id, .. } => {
                    let bytes = engine.get_by_id(&agreement_id).await?;
                    return Ok(OperationResponse::Payload { call_id, bytes });
                }
                Operation::FindAgreements { field, value, .. } => {
                    engine.get_by_field(field, &value).await?
                }
                Operation::ListAgreements { .. } => engine.get_all().await?,
                _ => return Err(OperationError::WrongService { operation }),
            };
            let bytes = matches.to_bytes().map_err(|source| StoreError::Encode {
                key: operation.to_string(),
                source,
            })?;
            Ok(OperationResponse::Payload { call_id, bytes })
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
