//! Chat message model shared by the store, windowing, and providers

use serde::{Deserialize, Serialize};

/// Chat message role
///
/// The wire role `model` used by one provider is an outbound payload concern
/// and lives in the provider adapter, not here.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// Chat message
///
/// Immutable once archived into a conversation; ordering is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Structured per-provider error surfaced to the caller with a retry
/// affordance. `code` is either the provider's own error code or one of the
/// stable codes produced by [`crate::error::ChatError::to_error_info`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

/// Identifies one of the two provider lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Gemini,
    OpenAi,
}

impl ProviderId {
    /// Both lanes, in display order.
    pub const ALL: [ProviderId; 2] = [ProviderId::Gemini, ProviderId::OpenAi];

    /// Stable key used for persistence and logging.
    pub fn key(&self) -> &'static str {
        match self {
            ProviderId::Gemini => "gemini",
            ProviderId::OpenAi => "openai",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            ProviderId::Gemini => 0,
            ProviderId::OpenAi => 1,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ProviderId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderId::Gemini),
            "openai" | "chatgpt" => Ok(ProviderId::OpenAi),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}
