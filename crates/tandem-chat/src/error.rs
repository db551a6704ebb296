//! Error types for the chat core

use thiserror::Error;

use crate::chat::ErrorInfo;

/// Chat core error types
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("signing failed: {0}")]
    Signing(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("provider rejected request ({code}): {message}")]
    ProviderRejected { code: String, message: String },

    #[error("response had no readable body")]
    EmptyBody,

    #[error("a generation is already in flight for this provider")]
    SessionBusy,

    #[error("input is empty")]
    EmptyInput,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    /// Collapse a turn failure into the per-provider error slot.
    ///
    /// Provider rejections carry their structured body through verbatim;
    /// everything else gets a stable code the UI can key on.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            ChatError::Signing(message) => ErrorInfo {
                code: "signing_failure".to_string(),
                message: message.clone(),
            },
            ChatError::Transport(e) => ErrorInfo {
                code: "transport_failure".to_string(),
                message: e.to_string(),
            },
            ChatError::ProviderRejected { code, message } => ErrorInfo {
                code: code.clone(),
                message: message.clone(),
            },
            ChatError::EmptyBody => ErrorInfo {
                code: "empty_body".to_string(),
                message: "response had no readable body".to_string(),
            },
            other => ErrorInfo {
                code: "internal".to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Result type alias for chat operations
pub type Result<T> = std::result::Result<T, ChatError>;
