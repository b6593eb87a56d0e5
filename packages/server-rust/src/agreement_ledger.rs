//! Entry points called by the external runtime.

use std::sync::Arc;

use tokio::sync::Mutex;
use tower::{Service, ServiceExt};
use tracing::debug;

use crate::config::LedgerConfig;
use crate::service::middleware::{build_operation_pipeline, OperationPipeline};
use crate::service::{
    service_names, AgreementService, EntryMode, OperationError, OperationRouter, OperationService,
    QueryService,
};
use crate::storage::{AgreementStore, LedgerPort, QueryEngine};

/// Agreement ledger bound to one [`LedgerPort`].
///
/// Every call is classified, checked for arity, and then dispatched through
/// the operation pipeline, which is built once. The pipeline handle is
/// locked only while a call is readied and started; ledger access itself
/// runs unlocked, so calls are expected to arrive one at a time.
pub struct AgreementLedger {
    classifier: OperationService,
    store: Arc<AgreementStore>,
    pipeline: Mutex<OperationPipeline>,
}

impl AgreementLedger {
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerPort>, config: LedgerConfig) -> Self {
        let store = Arc::new(AgreementStore::new(ledger, config));
        let engine = Arc::new(QueryEngine::new(Arc::clone(&store)));
        let router = OperationRouter::new()
            .with_service(
                service_names::AGREEMENT,
                AgreementService::new(Arc::clone(&store)),
            )
            .with_service(service_names::QUERY, QueryService::new(engine));
        Self {
            classifier: OperationService::new(),
            store,
            pipeline: Mutex::new(build_operation_pipeline(router)),
        }
    }

    /// The record store the ledger writes through.
    #[must_use]
    pub fn store(&self) -> &AgreementStore {
        &self.store
    }

    /// One-time setup: writes the diagnostic seed and resets the index.
    ///
    /// # Errors
    ///
    /// `InvalidArgumentCount` unless exactly one argument is given, or a
    /// ledger write failure.
    pub async fn setup(&self, args: Vec<String>) -> Result<Vec<u8>, OperationError> {
        self.dispatch(EntryMode::Invoke, "init", args).await
    }

    /// Runs a mutating operation. Returns empty bytes on success.
    ///
    /// # Errors
    ///
    /// Classification errors for unknown names or wrong arity, otherwise
    /// whatever the record store reports.
    pub async fn invoke(&self, operation: &str, args: Vec<String>) -> Result<Vec<u8>, OperationError> {
        self.dispatch(EntryMode::Invoke, operation, args).await
    }

    /// Legacy entry point; behaves exactly like [`invoke`](Self::invoke).
    ///
    /// # Errors
    ///
    /// Same as [`invoke`](Self::invoke).
    pub async fn run(&self, operation: &str, args: Vec<String>) -> Result<Vec<u8>, OperationError> {
        self.invoke(operation, args).await
    }

    /// Runs a read-only operation and returns its encoded result.
    ///
    /// # Errors
    ///
    /// Classification errors for unknown names or wrong arity, otherwise
    /// whatever the query engine reports.
    pub async fn query(&self, operation: &str, args: Vec<String>) -> Result<Vec<u8>, OperationError> {
        self.dispatch(EntryMode::Query, operation, args).await
    }

    async fn dispatch(
        &self,
        entry: EntryMode,
        name: &str,
        args: Vec<String>,
    ) -> Result<Vec<u8>, OperationError> {
        let op = self.classifier.classify(entry, name, args)?;
        debug!(call_id = op.ctx().call_id, operation = %op.ctx().kind, "dispatching call");

        let call = {
            let mut pipeline = self.pipeline.lock().await;
            pipeline.ready().await?.call(op)
        };
        let response = call.await?;
        Ok(response.into_bytes())
    }
}
