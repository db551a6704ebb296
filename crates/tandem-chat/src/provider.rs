//! Provider adapters
//!
//! The two providers want the same conversation in different record shapes.
//! Everything else about a turn (signing, envelope, streaming, archiving)
//! is identical, so the session stays generic and only the payload shaping
//! varies per adapter.

use serde_json::{Value, json};

use crate::chat::{Message, ProviderId, Role};

/// Provider-specific payload shaping.
pub trait ProviderAdapter: Send + Sync {
    fn id(&self) -> ProviderId;

    /// Map a windowed history into this provider's wire records.
    fn shape_messages(&self, window: &[Message]) -> Vec<Value>;
}

/// Gemini-style records: assistant turns become role `model` and content is
/// duplicated into a `parts` list.
pub struct GeminiAdapter;

impl ProviderAdapter for GeminiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn shape_messages(&self, window: &[Message]) -> Vec<Value> {
        window
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                json!({
                    "role": role,
                    "parts": [{ "text": msg.content }],
                    "content": msg.content,
                })
            })
            .collect()
    }
}

/// OpenAI-style records: flat `{role, content}` pairs.
pub struct OpenAiAdapter;

impl ProviderAdapter for OpenAiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn shape_messages(&self, window: &[Message]) -> Vec<Value> {
        window
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                };
                json!({ "role": role, "content": msg.content })
            })
            .collect()
    }
}
