//! Tandem Chat - dual-provider streaming chat core
//!
//! One user turn fans out to two backend providers at once; each reply
//! streams into its own conversation lane with independent retry,
//! cancellation, and error state. This crate provides:
//! - Message model and per-provider conversation store with change feed
//! - History windowing with same-role-run collapsing
//! - Signed streaming requests over a pluggable signing boundary
//! - Incremental multibyte-safe stream decoding
//! - Per-provider session state machine and the dual orchestrator
//! - Snapshot persistence over tandem-storage

pub mod chat;
pub mod decode;
pub mod error;
mod http_client;
pub mod orchestrator;
pub mod provider;
pub mod session;
pub mod signing;
pub mod snapshot;
pub mod store;
pub mod window;

// Re-export commonly used types
pub use chat::{ErrorInfo, Message, ProviderId, Role};
pub use error::{ChatError, Result};
pub use orchestrator::DualOrchestrator;
pub use provider::{GeminiAdapter, OpenAiAdapter, ProviderAdapter};
pub use session::{ProviderSession, SessionConfig, SessionState};
pub use signing::{RequestSigner, SharedSecretSigner, SignPayload};
pub use store::ChatStore;
pub use window::window_history;
