//! Persistent [`LedgerPort`] backed by a single redb database file.

use std::path::Path;

use async_trait::async_trait;
use redb::{Database, ReadableTable, TableDefinition};

use crate::storage::ledger::LedgerPort;

const LEDGER_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("ledger");

/// redb-backed ledger.
///
/// Every `put` and `delete` runs in its own write transaction, so each call
/// is atomic and durable on return; nothing spans calls.
pub struct RedbLedger {
    db: Database,
}

impl RedbLedger {
    /// Opens (or creates) the ledger file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the ledger table
    /// cannot be created.
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let db = Database::create(path)?;
        let txn = db.begin_write()?;
        txn.open_table(LEDGER_TABLE)?;
        txn.commit()?;
        Ok(Self { db })
    }
}

#[async_trait]
impl LedgerPort for RedbLedger {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(LEDGER_TABLE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    async fn put(&self, key: &str, value: &[u8]) -> anyhow::Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LEDGER_TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(LEDGER_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }
}
