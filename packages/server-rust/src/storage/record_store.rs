//! Agreement record store.
//!
//! [`AgreementStore`] is the only writer of agreement records. Every create
//! and delete touches two ledger keys (the record, then the index), in that
//! order, with no atomicity between them:
//!
//! - a crash after the record write but before the index append leaves a
//!   record readable by identifier but invisible to scans;
//! - a failed index removal after a delete leaves a dangling index entry,
//!   which the next scan reports as `NotFound`.
//!
//! Re-running `delete` on the identifier repairs the second case.

use std::sync::Arc;

use agreement_core::Agreement;
use tracing::{debug, info};

use crate::config::LedgerConfig;
use crate::storage::error::StoreError;
use crate::storage::index::IndexStore;
use crate::storage::ledger::LedgerPort;

/// Create/read/update/delete of agreements, keeping the index in step.
pub struct AgreementStore {
    ledger: Arc<dyn LedgerPort>,
    index: IndexStore,
    config: LedgerConfig,
}

impl AgreementStore {
    #[must_use]
    pub fn new(ledger: Arc<dyn LedgerPort>, config: LedgerConfig) -> Self {
        let index = IndexStore::new(ledger.clone(), config.index_key.clone());
        Self {
            ledger,
            index,
            config,
        }
    }

    #[must_use]
    pub fn index(&self) -> &IndexStore {
        &self.index
    }

    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Writes the diagnostic seed and resets the index to empty.
    ///
    /// Safe to call again; every call is a full reset of the index. Records
    /// already in the ledger are left in place but stop being listed.
    ///
    /// # Errors
    ///
    /// `LedgerWrite` if either write fails.
    pub async fn initialize(&self, seed: &str) -> Result<(), StoreError> {
        self.ledger
            .put(&self.config.diagnostic_key, seed.as_bytes())
            .await
            .map_err(|source| StoreError::LedgerWrite {
                key: self.config.diagnostic_key.clone(),
                source,
            })?;
        self.index.reset().await?;
        info!(diagnostic_key = %self.config.diagnostic_key, "agreement ledger initialized");
        Ok(())
    }

    /// Stores a new agreement and indexes it.
    ///
    /// # Errors
    ///
    /// `EmptyIdentifier` for an empty identifier, which would read back as
    /// the zero record; `AlreadyExists` if a live record holds the
    /// identifier (or the identifier is a reserved ledger key); otherwise
    /// ledger and codec failures.
    pub async fn create(&self, agreement: Agreement) -> Result<(), StoreError> {
        let id = agreement.agreement_id.clone();
        if id.is_empty() {
            return Err(StoreError::EmptyIdentifier);
        }
        if self.config.is_reserved(&id) || self.get(&id).await?.is_some() {
            return Err(StoreError::AlreadyExists { id });
        }

        self.write(&agreement).await?;
        self.index.append(&id).await?;
        debug!(id = %id, "agreement created");
        Ok(())
    }

    /// Raw stored bytes for `id`, or `None` if nothing is stored there.
    ///
    /// # Errors
    ///
    /// `LedgerRead` if the ledger read fails.
    pub async fn read_raw(&self, id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.config.is_reserved(id) {
            return Ok(None);
        }
        self.ledger
            .get(id)
            .await
            .map_err(|source| StoreError::LedgerRead {
                key: id.to_string(),
                source,
            })
    }

    /// The live agreement stored under `id`, if any.
    ///
    /// A stored value that decodes to the zero record is treated as absent.
    ///
    /// # Errors
    ///
    /// `LedgerRead` if the ledger read fails, `Decode` if the stored bytes
    /// are not a valid record.
    pub async fn get(&self, id: &str) -> Result<Option<Agreement>, StoreError> {
        let Some(bytes) = self.read_raw(id).await? else {
            return Ok(None);
        };
        let agreement = agreement_core::decode(&bytes).map_err(|source| StoreError::Decode {
            key: id.to_string(),
            source,
        })?;
        Ok((!agreement.is_zero()).then_some(agreement))
    }

    /// Replaces every mutable field of an existing agreement.
    ///
    /// The identifier of `changes` selects the record and is never changed.
    /// The index is untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` if no live record holds the identifier; otherwise ledger
    /// and codec failures.
    pub async fn update(&self, changes: Agreement) -> Result<(), StoreError> {
        let id = changes.agreement_id.clone();
        let Some(existing) = self.get(&id).await? else {
            return Err(StoreError::NotFound { id });
        };

        self.write(&existing.updated_with(changes)).await?;
        debug!(id = %id, "agreement updated");
        Ok(())
    }

    /// Deletes the record for `id`, then drops `id` from the index.
    ///
    /// Deleting an identifier with no stored record is not an error, so a
    /// dangling index entry can be cleared by deleting it.
    ///
    /// # Errors
    ///
    /// `NotFound` for a reserved ledger key; otherwise ledger and codec
    /// failures.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        if self.config.is_reserved(id) {
            return Err(StoreError::NotFound { id: id.to_string() });
        }

        self.ledger
            .delete(id)
            .await
            .map_err(|source| StoreError::LedgerWrite {
                key: id.to_string(),
                source,
            })?;
        let was_indexed = self.index.remove(id).await?;
        debug!(id, was_indexed, "agreement deleted");
        Ok(())
    }

    async fn write(&self, agreement: &Agreement) -> Result<(), StoreError> {
        let key = &agreement.agreement_id;
        let bytes = agreement_core::encode(agreement).map_err(|source| StoreError::Encode {
            key: key.clone(),
            source,
        })?;
        self.ledger
            .put(key, &bytes)
            .await
            .map_err(|source| StoreError::LedgerWrite {
                key: key.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::storage::ledgers::MemoryLedger;
    use crate::storage::testing::FaultyLedger;

    fn make_agreement(id: &str, lender: &str) -> Agreement {
        Agreement {
            agreement_id: id.to_string(),
            borrower_name: "Ada".to_string(),
            lender_name: lender.to_string(),
            agreement_date: "2016-06-01".to_string(),
            loan_amount: "5000".to_string(),
            agreement_status: "open".to_string(),
            interest_rate: "3.0".to_string(),
            loan_duration: "24".to_string(),
            repayment_date: "2018-06-01".to_string(),
            borrower_signed: "yes".to_string(),
            lender_signed: "no".to_string(),
            comments: String::new(),
        }
    }

    async fn make_store() -> (Arc<MemoryLedger>, AgreementStore) {
        let ledger = Arc::new(MemoryLedger::new());
        let store = AgreementStore::new(ledger.clone(), LedgerConfig::default());
        store.initialize("hello").await.unwrap();
        (ledger, store)
    }

    #[tokio::test]
    async fn initialize_writes_seed_and_empty_index() {
        let (ledger, store) = make_store().await;
        assert_eq!(ledger.get("abc").await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(ledger.get("_LoanIndex").await.unwrap(), Some(b"[]".to_vec()));
        assert!(store.index().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn initialize_again_resets_the_index() {
        let (ledger, store) = make_store().await;
        store.create(make_agreement("A-1", "Bank")).await.unwrap();

        store.initialize("again").await.unwrap();
        assert!(store.index().load().await.unwrap().is_empty());
        assert_eq!(ledger.get("abc").await.unwrap(), Some(b"again".to_vec()));
    }

    #[tokio::test]
    async fn create_then_get_returns_the_same_fields() {
        let (_, store) = make_store().await;
        let agreement = make_agreement("A-1", "Bank");

        store.create(agreement.clone()).await.unwrap();

        assert_eq!(store.get("A-1").await.unwrap(), Some(agreement));
        assert_eq!(store.index().load().await.unwrap(), vec!["A-1"]);
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected_and_changes_nothing() {
        let (ledger, store) = make_store().await;
        let original = make_agreement("A-1", "Bank");
        store.create(original.clone()).await.unwrap();
        let writes = ledger.write_count();

        let err = store
            .create(make_agreement("A-1", "Other Bank"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        assert_eq!(ledger.write_count(), writes);
        assert_eq!(store.get("A-1").await.unwrap(), Some(original));
        assert_eq!(store.index().load().await.unwrap(), vec!["A-1"]);
    }

    #[tokio::test]
    async fn create_rejects_reserved_keys() {
        let (_, store) = make_store().await;
        for reserved in ["_LoanIndex", "abc"] {
            let err = store
                .create(make_agreement(reserved, "Bank"))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::AlreadyExists);
        }
        assert!(store.index().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_empty_identifier_without_touching_the_ledger() {
        let (ledger, store) = make_store().await;
        store.create(make_agreement("A-1", "Bank")).await.unwrap();
        let writes = ledger.write_count();

        for _ in 0..2 {
            let err = store.create(make_agreement("", "Bank")).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
        }

        assert_eq!(ledger.write_count(), writes);
        assert!(!ledger.contains_key(""));
        assert_eq!(store.index().load().await.unwrap(), vec!["A-1"]);
    }

    #[tokio::test]
    async fn create_over_a_zero_record_succeeds() {
        let (ledger, store) = make_store().await;
        ledger.put("A-1", b"").await.unwrap();

        store.create(make_agreement("A-1", "Bank")).await.unwrap();
        assert!(store.get("A-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn get_of_unknown_identifier_is_none() {
        let (_, store) = make_store().await;
        assert!(store.get("missing").await.unwrap().is_none());
        assert!(store.read_raw("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reserved_keys_never_read_as_records() {
        let (_, store) = make_store().await;
        assert!(store.read_raw("_LoanIndex").await.unwrap().is_none());
        assert!(store.get("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_record_is_a_decode_failure() {
        let (ledger, store) = make_store().await;
        ledger.put("A-1", b"{\"agreement_id\":").await.unwrap();

        let err = store.get("A-1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);

        let err = store.create(make_agreement("A-1", "Bank")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }

    #[tokio::test]
    async fn update_replaces_every_mutable_field() {
        let (_, store) = make_store().await;
        store.create(make_agreement("A-1", "Bank")).await.unwrap();

        let changes = Agreement {
            agreement_id: "A-1".to_string(),
            borrower_name: "Grace".to_string(),
            lender_name: "Credit Union".to_string(),
            agreement_date: "2017-01-01".to_string(),
            loan_amount: "9000".to_string(),
            agreement_status: "closed".to_string(),
            interest_rate: "2.5".to_string(),
            loan_duration: "6".to_string(),
            repayment_date: "2017-07-01".to_string(),
            borrower_signed: "yes".to_string(),
            lender_signed: "yes".to_string(),
            comments: "repaid early".to_string(),
        };
        store.update(changes.clone()).await.unwrap();

        let stored = store.get("A-1").await.unwrap().unwrap();
        assert_eq!(stored, changes);
        assert_eq!(stored.lender_signed, "yes");
        assert_eq!(stored.comments, "repaid early");
        assert_eq!(store.index().load().await.unwrap(), vec!["A-1"]);
    }

    #[tokio::test]
    async fn update_of_missing_record_is_not_found_and_writes_nothing() {
        let (ledger, store) = make_store().await;
        let writes = ledger.write_count();

        let err = store.update(make_agreement("ghost", "Bank")).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(ledger.write_count(), writes);
        assert!(!ledger.contains_key("ghost"));
    }

    #[tokio::test]
    async fn delete_removes_record_and_index_entry() {
        let (ledger, store) = make_store().await;
        store.create(make_agreement("A-1", "Bank")).await.unwrap();
        store.create(make_agreement("A-2", "Bank")).await.unwrap();

        store.delete("A-1").await.unwrap();

        assert!(!ledger.contains_key("A-1"));
        assert!(store.get("A-1").await.unwrap().is_none());
        assert_eq!(store.index().load().await.unwrap(), vec!["A-2"]);
    }

    #[tokio::test]
    async fn delete_of_unknown_identifier_succeeds() {
        let (_, store) = make_store().await;
        assert!(store.delete("never-created").await.is_ok());
    }

    #[tokio::test]
    async fn delete_refuses_reserved_keys() {
        let (ledger, store) = make_store().await;
        let err = store.delete("_LoanIndex").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(ledger.contains_key("_LoanIndex"));
    }

    #[tokio::test]
    async fn failed_index_append_leaves_record_unindexed() {
        let ledger = Arc::new(FaultyLedger::new());
        let store = AgreementStore::new(ledger.clone(), LedgerConfig::default());
        store.initialize("seed").await.unwrap();

        ledger.fail_writes_of("_LoanIndex");
        let err = store.create(make_agreement("A-1", "Bank")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerWriteFailure);

        ledger.heal();
        assert!(store.get("A-1").await.unwrap().is_some());
        assert!(store.index().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_record_delete_keeps_index_entry() {
        let ledger = Arc::new(FaultyLedger::new());
        let store = AgreementStore::new(ledger.clone(), LedgerConfig::default());
        store.initialize("seed").await.unwrap();
        store.create(make_agreement("A-1", "Bank")).await.unwrap();

        ledger.fail_writes_of("A-1");
        let err = store.delete("A-1").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerWriteFailure);
        assert_eq!(store.index().load().await.unwrap(), vec!["A-1"]);
    }

    #[tokio::test]
    async fn ledger_read_failure_names_the_identifier() {
        let ledger = Arc::new(FaultyLedger::new());
        let store = AgreementStore::new(ledger.clone(), LedgerConfig::default());

        ledger.fail_reads_of("A-9");
        let err = store.read_raw("A-9").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LedgerReadFailure);
        assert_eq!(err.to_string(), "Failed to get state for A-9");
    }
}
