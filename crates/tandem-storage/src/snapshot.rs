//! Snapshot storage - byte-level API for persisted conversation state.
//!
//! Intentionally minimal: the chat layer writes whole values per key on
//! teardown and reads them back on startup, so all this needs is put/get.

use anyhow::Result;
use redb::{Database, ReadableDatabase, TableDefinition};
use std::sync::Arc;

const SNAPSHOTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("snapshots");

/// Low-level snapshot storage with byte-level API
#[derive(Debug, Clone)]
pub struct SnapshotStorage {
    db: Arc<Database>,
}

impl SnapshotStorage {
    pub fn new(db: Arc<Database>) -> Result<Self> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(SNAPSHOTS_TABLE)?;
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Store raw snapshot data under a key, replacing any previous value
    pub fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        write_txn.open_table(SNAPSHOTS_TABLE)?.insert(key, data)?;
        write_txn.commit()?;
        Ok(())
    }

    /// Get raw snapshot data by key
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SNAPSHOTS_TABLE)?;
        Ok(table.get(key)?.map(|data| data.value().to_vec()))
    }
}
