//! Fault-injecting ledger wrapper for storage tests.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashSet;

use crate::storage::ledger::LedgerPort;
use crate::storage::ledgers::MemoryLedger;

/// Wraps a [`MemoryLedger`] and fails calls on chosen keys.
#[derive(Default)]
pub(crate) struct FaultyLedger {
    pub(crate) inner: Arc<MemoryLedger>,
    failing_reads: DashSet<String>,
    failing_writes: DashSet<String>,
}

impl FaultyLedger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_reads_of(&self, key: &str) {
        self.failing_reads.insert(key.to_string());
    }

    pub(crate) fn fail_writes_of(&self, key: &str) {
        self.failing_writes.insert(key.to_string());
    }

    pub(crate) fn heal(&self) {
        self.failing_reads.clear();
        self.failing_writes.clear();
    }
}

#[async_trait]
impl LedgerPort for FaultyLedger {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        if self.failing_reads.contains(key) {
            anyhow::bail!("injected read fault on {key}");
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        if self.failing_writes.contains(key) {
            anyhow::bail!("injected write fault on {key}");
        }
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        if self.failing_writes.contains(key) {
            anyhow::bail!("injected delete fault on {key}");
        }
        self.inner.delete(key).await
    }
}
