//! Provider session - one provider's request/stream lifecycle
//!
//! A session owns at most one in-flight generation at a time and walks it
//! through Idle -> Requesting -> Streaming -> Archiving -> Idle. Cancelling
//! mid-stream still commits whatever text already arrived; a hard failure
//! commits nothing and surfaces as the lane's ErrorInfo instead. Nothing is
//! ever retried automatically.

use std::sync::Arc;

use chrono::Utc;
use futures::StreamExt;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::chat::ProviderId;
use crate::decode::StreamDecoder;
use crate::error::{ChatError, Result};
use crate::http_client::build_http_client;
use crate::provider::ProviderAdapter;
use crate::signing::{RequestSigner, SignPayload};
use crate::store::ChatStore;

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Requesting,
    Streaming,
    Archiving,
}

/// Per-provider request settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Full URL of the provider's generation endpoint.
    pub endpoint: String,
    /// Optional access password forwarded in every envelope.
    pub pass: Option<String>,
    /// Maximum number of history messages per outbound payload.
    pub max_history: usize,
}

/// Outbound request envelope, identical for both providers.
#[derive(Serialize)]
struct TurnRequest {
    messages: Vec<Value>,
    time: i64,
    pass: Option<String>,
    sign: String,
}

/// Structured rejection body: `{"error": {"code": ..., "message": ...}}`.
#[derive(serde::Deserialize)]
struct RejectionBody {
    error: crate::chat::ErrorInfo,
}

enum TurnEnd {
    Completed,
    Cancelled,
}

struct Inner {
    state: SessionState,
    cancel: Option<CancellationToken>,
}

/// One provider's exclusive generation lifecycle.
pub struct ProviderSession {
    adapter: Arc<dyn ProviderAdapter>,
    signer: Arc<dyn RequestSigner>,
    store: Arc<ChatStore>,
    config: SessionConfig,
    client: reqwest::Client,
    inner: Mutex<Inner>,
}

impl ProviderSession {
    pub fn new(
        adapter: Arc<dyn ProviderAdapter>,
        signer: Arc<dyn RequestSigner>,
        store: Arc<ChatStore>,
        config: SessionConfig,
    ) -> Self {
        Self {
            adapter,
            signer,
            store,
            config,
            client: build_http_client(),
            inner: Mutex::new(Inner {
                state: SessionState::Idle,
                cancel: None,
            }),
        }
    }

    pub fn provider(&self) -> ProviderId {
        self.adapter.id()
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state
    }

    pub fn is_idle(&self) -> bool {
        self.state() == SessionState::Idle
    }

    /// Run one full generation turn against the stored history.
    ///
    /// Only valid from Idle; a second call while a turn is in flight is a
    /// caller bug and returns `SessionBusy` without touching the lane. All
    /// in-turn failures are contained: they land in the lane's ErrorInfo
    /// and the session returns to Idle.
    pub async fn start(&self) -> Result<()> {
        let cancel = self.acquire()?;
        let id = self.adapter.id();
        self.store.begin_draft(id);
        tracing::debug!(provider = %id, "starting generation turn");

        match self.run_turn(&cancel).await {
            Ok(TurnEnd::Completed) => {
                self.set_state(SessionState::Archiving);
                self.store.archive_draft(id);
                tracing::debug!(provider = %id, "turn archived");
            }
            Ok(TurnEnd::Cancelled) => {
                // Cancellation is not data loss: partial output is kept
                self.set_state(SessionState::Archiving);
                let archived = self.store.archive_draft(id);
                tracing::info!(provider = %id, archived, "turn cancelled");
            }
            Err(err) => {
                tracing::warn!(provider = %id, error = %err, "turn failed");
                self.store.set_error(id, err.to_error_info());
            }
        }

        self.release();
        Ok(())
    }

    /// Cancel the in-flight turn, if any. Valid from Requesting/Streaming;
    /// a no-op otherwise.
    pub fn cancel(&self) {
        let inner = self.inner.lock();
        if let Some(token) = &inner.cancel {
            token.cancel();
        }
    }

    /// Replace the last assistant reply, if there is one, and re-request.
    ///
    /// Only valid from Idle. When the lane's last entry is a user turn that
    /// never got a reply, nothing is dropped and the turn is simply
    /// re-submitted from the history as it stands.
    pub async fn retry(&self) -> Result<()> {
        if !self.is_idle() {
            return Err(ChatError::SessionBusy);
        }
        self.store.drop_last_if_assistant(self.adapter.id());
        self.start().await
    }

    fn acquire(&self) -> Result<CancellationToken> {
        let mut inner = self.inner.lock();
        if inner.state != SessionState::Idle {
            return Err(ChatError::SessionBusy);
        }
        let token = CancellationToken::new();
        inner.state = SessionState::Requesting;
        inner.cancel = Some(token.clone());
        Ok(token)
    }

    fn set_state(&self, state: SessionState) {
        self.inner.lock().state = state;
    }

    fn release(&self) {
        let mut inner = self.inner.lock();
        inner.state = SessionState::Idle;
        inner.cancel = None;
    }

    async fn run_turn(&self, cancel: &CancellationToken) -> Result<TurnEnd> {
        let id = self.adapter.id();
        let window = self.store.window(id, self.config.max_history);
        let last_text = window
            .last()
            .map(|msg| msg.content.clone())
            .unwrap_or_default();

        let time = Utc::now().timestamp_millis();
        let sign = self
            .signer
            .sign(&SignPayload { t: time, m: last_text })
            .await?;

        let body = TurnRequest {
            messages: self.adapter.shape_messages(&window),
            time,
            pass: self.config.pass.clone(),
            sign,
        };

        let response = tokio::select! {
            _ = cancel.cancelled() => return Ok(TurnEnd::Cancelled),
            sent = self.client.post(&self.config.endpoint).json(&body).send() => sent?,
        };

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(parse_rejection(status, &text));
        }

        let mut stream = response.bytes_stream();
        let mut decoder = StreamDecoder::new();
        let mut saw_bytes = false;

        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => return Ok(TurnEnd::Cancelled),
                next = stream.next() => next,
            };

            match next {
                Some(Ok(bytes)) => {
                    if !saw_bytes {
                        saw_bytes = true;
                        self.set_state(SessionState::Streaming);
                    }
                    let fragment = decoder.feed(&bytes);
                    self.store.push_draft(id, &fragment);
                }
                Some(Err(e)) if !saw_bytes => {
                    tracing::debug!(provider = %id, error = %e, "body unreadable");
                    return Err(ChatError::EmptyBody);
                }
                Some(Err(e)) => return Err(ChatError::Transport(e)),
                None => break,
            }
        }

        let trailing = decoder.finish();
        self.store.push_draft(id, &trailing);
        Ok(TurnEnd::Completed)
    }
}

/// Map a non-OK response to the error it carries.
///
/// Providers answer rejections with `{"error": {code, message}}`; that body
/// passes through verbatim. Anything else collapses to a generic rejection
/// keyed by status, with the body truncated to keep large or sensitive
/// responses out of the error slot.
fn parse_rejection(status: u16, body: &str) -> ChatError {
    if let Ok(parsed) = serde_json::from_str::<RejectionBody>(body) {
        return ChatError::ProviderRejected {
            code: parsed.error.code,
            message: parsed.error.message,
        };
    }

    const MAX_ERROR_BODY: usize = 512;
    let message = if body.len() > MAX_ERROR_BODY {
        // Back off to a char boundary so multi-byte text cannot panic
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... [truncated]", &body[..cut])
    } else {
        body.to_string()
    };

    ChatError::ProviderRejected {
        code: format!("http_{status}"),
        message,
    }
}
