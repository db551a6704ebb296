//! Tandem Storage - Low-level persistence for the dual-chat client
//!
//! Exposes a byte-level key-value API over a single redb table so the chat
//! crate can persist its snapshot without this crate depending on the chat
//! types. Higher-level typed wrappers live in tandem-chat.

pub mod snapshot;

use anyhow::Result;
use redb::Database;
use std::path::Path;
use std::sync::Arc;

pub use snapshot::SnapshotStorage;

/// Central storage handle that opens the database and its tables.
pub struct Storage {
    pub snapshots: SnapshotStorage,
}

impl Storage {
    /// Open (or create) the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        tracing::debug!(path = %path.as_ref().display(), "opening database");
        let db = Arc::new(Database::create(path.as_ref())?);
        Ok(Self {
            snapshots: SnapshotStorage::new(db)?,
        })
    }
}
