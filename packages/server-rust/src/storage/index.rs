//! The agreement index: one ledger value listing every live identifier.
//!
//! The ledger cannot scan, so [`IndexStore`] is the only way to enumerate
//! agreements. Each mutation is a load-modify-store against the ledger with
//! no atomicity across the three steps.

use std::sync::Arc;

use tracing::debug;

use crate::storage::error::StoreError;
use crate::storage::ledger::LedgerPort;

/// Load/append/remove access to the ordered identifier list.
///
/// Invariant maintained across calls: no identifier appears twice.
pub struct IndexStore {
    ledger: Arc<dyn LedgerPort>,
    key: String,
}

impl IndexStore {
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerPort>, key: impl Into<String>) -> Self {
        Self {
            ledger,
            key: key.into(),
        }
    }

    /// Ledger key the index is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the identifier list. A never-written index is empty.
    ///
    /// # Errors
    ///
    /// `LedgerRead` if the ledger read fails, `Decode` if the stored value is
    /// not an identifier list.
    pub async fn load(&self) -> Result<Vec<String>, StoreError> {
        let bytes = self
            .ledger
            .get(&self.key)
            .await
            .map_err(|source| StoreError::LedgerRead {
                key: self.key.clone(),
                source,
            })?;

        match bytes {
            None => Ok(Vec::new()),
            Some(bytes) => {
                agreement_core::decode_index(&bytes).map_err(|source| StoreError::Decode {
                    key: self.key.clone(),
                    source,
                })
            }
        }
    }

    /// Overwrites the index with an empty list.
    ///
    /// # Errors
    ///
    /// `LedgerWrite` if the ledger write fails.
    pub async fn reset(&self) -> Result<(), StoreError> {
        self.store(&[]).await
    }

    /// Appends `id` unless it is already listed.
    ///
    /// Returns `false` (and writes nothing) for a duplicate.
    ///
    /// # Errors
    ///
    /// Propagates load and store failures.
    pub async fn append(&self, id: &str) -> Result<bool, StoreError> {
        let mut ids = self.load().await?;
        if ids.iter().any(|existing| existing == id) {
            debug!(index = %self.key, id, "identifier already indexed");
            return Ok(false);
        }
        ids.push(id.to_string());
        self.store(&ids).await?;
        debug!(index = %self.key, id, len = ids.len(), "identifier appended");
        Ok(true)
    }

    /// Removes `id`, shifting later entries left.
    ///
    /// Returns `false` (and writes nothing) when `id` is not listed.
    ///
    /// # Errors
    ///
    /// Propagates load and store failures.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let mut ids = self.load().await?;
        let Some(position) = ids.iter().position(|existing| existing == id) else {
            debug!(index = %self.key, id, "identifier not indexed, nothing to remove");
            return Ok(false);
        };
        ids.remove(position);
        self.store(&ids).await?;
        debug!(index = %self.key, id, len = ids.len(), "identifier removed");
        Ok(true)
    }

    async fn store(&self, ids: &[String]) -> Result<(), StoreError> {
        let bytes = agreement_core::encode_index(ids).map_err(|source| StoreError::Encode {
            key: self.key.clone(),
            source,
        })?;
        self.ledger
            .put(&self.key, &bytes)
            .await
            .map_err(|source| StoreError::LedgerWrite {
                key: self.key.clone(),
                source,
            })
    }
}
