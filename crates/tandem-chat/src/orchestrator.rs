//! Dual orchestrator - fans one user turn out to both providers
//!
//! Both sessions run the same turn concurrently and finish independently:
//! one provider failing, streaming slowly, or being cancelled never blocks
//! or aborts the other. The only synchronization point is the submit
//! instant itself.

use std::sync::Arc;

use crate::chat::ProviderId;
use crate::error::{ChatError, Result};
use crate::session::ProviderSession;
use crate::store::ChatStore;

pub struct DualOrchestrator {
    store: Arc<ChatStore>,
    gemini: Arc<ProviderSession>,
    openai: Arc<ProviderSession>,
}

impl DualOrchestrator {
    /// Build from a shared store and the two pre-configured sessions.
    ///
    /// Both sessions must target the same store; each mutates only its own
    /// lane.
    pub fn new(
        store: Arc<ChatStore>,
        gemini: Arc<ProviderSession>,
        openai: Arc<ProviderSession>,
    ) -> Self {
        Self {
            store,
            gemini,
            openai,
        }
    }

    pub fn store(&self) -> &Arc<ChatStore> {
        &self.store
    }

    fn session(&self, id: ProviderId) -> &Arc<ProviderSession> {
        match id {
            ProviderId::Gemini => &self.gemini,
            ProviderId::OpenAi => &self.openai,
        }
    }

    /// Submit one user turn to both providers and wait for both to settle.
    ///
    /// Rejects empty or whitespace-only input, and rejects while either
    /// provider still has a turn in flight. Per-provider failures do not
    /// surface here; they land in each lane's ErrorInfo.
    pub async fn submit(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if self.is_loading() {
            return Err(ChatError::SessionBusy);
        }

        self.store.append_user(ProviderId::Gemini, text);
        self.store.append_user(ProviderId::OpenAi, text);

        let (gemini, openai) = tokio::join!(self.gemini.start(), self.openai.start());
        gemini.and(openai)
    }

    /// Cancel any in-flight turn on either provider.
    pub fn stop_all(&self) {
        self.gemini.cancel();
        self.openai.cancel();
    }

    /// Retry the last turn of one provider only.
    pub async fn retry(&self, id: ProviderId) -> Result<()> {
        self.session(id).retry().await
    }

    /// Drop both conversations, drafts, and errors.
    pub fn clear(&self) {
        self.store.clear_all();
    }

    /// Whether either provider has a turn in flight. Derived, not stored.
    pub fn is_loading(&self) -> bool {
        !self.gemini.is_idle() || !self.openai.is_idle()
    }
}
