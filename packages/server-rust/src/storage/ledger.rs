//! The ledger port: the external key-value store everything is built on.
//!
//! Defines [`LedgerPort`], the single-key get/put/delete primitive. There is
//! no scan, no multi-key atomicity, and no transaction spanning calls; the
//! [`IndexStore`](super::IndexStore) exists because of that.

use async_trait::async_trait;

/// Single-key-atomic key-value ledger.
///
/// Each call is atomic on its own. A sequence of calls is not, so callers
/// that write more than one key must tolerate a crash between writes.
///
/// Used as `Arc<dyn LedgerPort>`.
#[async_trait]
pub trait LedgerPort: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `None` if the key has never been written or was deleted.
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &[u8]) -> anyhow::Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> anyhow::Result<()>;
}
