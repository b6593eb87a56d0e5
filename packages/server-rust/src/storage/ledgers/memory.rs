//! In-memory [`LedgerPort`] backed by [`DashMap`].

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::storage::ledger::LedgerPort;

/// In-memory ledger for tests, demos, and ephemeral runs.
///
/// Counts every `put` and `delete` so callers can assert that a rejected
/// operation never touched the ledger.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    entries: DashMap<String, Vec<u8>>,
    writes: AtomicU64,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `put` and `delete` calls served so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Whether `key` currently holds a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether the ledger holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl LedgerPort for MemoryLedger {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|value| value.clone()))
    }

    async fn put(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        self.entries.remove(key);
        Ok(())
    }
}
