//! Linear-scan queries over the agreement index.
//!
//! The ledger has no range scan, so every multi-record query walks the index
//! in order and fetches each record by key. Scans are fail-fast: the first
//! entry that cannot be read or decoded aborts the query and no partial
//! result is returned.

use std::sync::Arc;

use agreement_core::{AgreementField, AgreementSet};
use tracing::{debug, warn};

use crate::storage::error::StoreError;
use crate::storage::record_store::AgreementStore;

/// Read-only query access to agreements.
pub struct QueryEngine {
    store: Arc<AgreementStore>,
}

impl QueryEngine {
    #[must_use]
    pub fn new(store: Arc<AgreementStore>) -> Self {
        Self { store }
    }

    /// Raw stored bytes for `id`; empty when nothing is stored there.
    ///
    /// # Errors
    ///
    /// `LedgerRead` if the ledger read fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Vec<u8>, StoreError> {
        Ok(self.store.read_raw(id).await?.unwrap_or_default())
    }

    /// Every indexed agreement whose `field` equals `value` exactly.
    ///
    /// # Errors
    ///
    /// See [`get_all`](Self::get_all).
    pub async fn get_by_field(
        &self,
        field: AgreementField,
        value: &str,
    ) -> Result<AgreementSet, StoreError> {
        self.scan(Some((field, value))).await
    }

    /// Every indexed agreement, in index order.
    ///
    /// # Errors
    ///
    /// Index load failures; `LedgerRead` or `Decode` for any indexed record;
    /// `NotFound` for an index entry whose record no longer exists.
    pub async fn get_all(&self) -> Result<AgreementSet, StoreError> {
        self.scan(None).await
    }

    async fn scan(&self, filter: Option<(AgreementField, &str)>) -> Result<AgreementSet, StoreError> {
        let ids = self.store.index().load().await?;
        let mut matches = AgreementSet::new();

        for (position, id) in ids.into_iter().enumerate() {
            let Some(agreement) = self.store.get(&id).await? else {
                warn!(id = %id, position, "index entry has no stored agreement");
                return Err(StoreError::NotFound { id });
            };
            let selected = match filter {
                Some((field, value)) => field.matches(&agreement, value),
                None => true,
            };
            if selected {
                matches.push(id, agreement);
            }
        }

        debug!(
            field = filter.map(|(field, _)| field.name()),
            matches = matches.len(),
            "index scan complete"
        );
        Ok(matches)
    }
}
