//! Snapshot persistence for the chat store
//!
//! Serializes both conversations and the stickiness flag into the byte
//! store on teardown and restores them on startup. Restoration must never
//! crash on missing or malformed data; anything unreadable falls back to
//! the empty default for that key.

use anyhow::Result;
use serde_json::from_slice;
use tandem_storage::SnapshotStorage;

use crate::chat::{Message, ProviderId};
use crate::store::ChatStore;

const KEY_GEMINI: &str = "conversation:gemini";
const KEY_OPENAI: &str = "conversation:openai";
const KEY_STICK: &str = "stick_to_bottom";

/// Write the store's persisted state and mark it clean.
pub fn save(storage: &SnapshotStorage, store: &ChatStore) -> Result<()> {
    let gemini = serde_json::to_vec(&store.conversation(ProviderId::Gemini))?;
    let openai = serde_json::to_vec(&store.conversation(ProviderId::OpenAi))?;
    let stick = serde_json::to_vec(&store.stick_to_bottom())?;

    storage.put(KEY_GEMINI, &gemini)?;
    storage.put(KEY_OPENAI, &openai)?;
    storage.put(KEY_STICK, &stick)?;

    store.mark_clean();
    Ok(())
}

/// Write only when something changed since the last save.
pub fn save_if_dirty(storage: &SnapshotStorage, store: &ChatStore) -> Result<()> {
    if store.is_dirty() {
        save(storage, store)?;
    }
    Ok(())
}

/// Restore the store from a previous snapshot.
///
/// Absent or malformed keys load as their empty defaults; only storage
/// itself failing is an error.
pub fn load(storage: &SnapshotStorage, store: &ChatStore) -> Result<()> {
    let gemini = load_key::<Vec<Message>>(storage, KEY_GEMINI)?;
    let openai = load_key::<Vec<Message>>(storage, KEY_OPENAI)?;
    let stick = load_key::<bool>(storage, KEY_STICK)?;

    store.restore(gemini, openai, stick);
    Ok(())
}

fn load_key<T: serde::de::DeserializeOwned + Default>(
    storage: &SnapshotStorage,
    key: &str,
) -> Result<T> {
    let Some(bytes) = storage.get(key)? else {
        return Ok(T::default());
    };

    match from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "malformed snapshot entry, using default");
            Ok(T::default())
        }
    }
}
