//! Request signing boundary
//!
//! Every outbound generation request carries `{time, sign, pass}` next to
//! the payload. The core only consumes a signature; the algorithm sits
//! behind [`RequestSigner`] so deployments can swap it without touching the
//! session code. A signing failure aborts the turn for that provider only
//! and is never retried here.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::{ChatError, Result};

/// The salient content a signature commits to.
#[derive(Debug, Clone)]
pub struct SignPayload {
    /// Epoch milliseconds of the request.
    pub t: i64,
    /// Text of the last windowed message.
    pub m: String,
}

/// Computes the per-request signature.
#[async_trait]
pub trait RequestSigner: Send + Sync {
    async fn sign(&self, payload: &SignPayload) -> Result<String>;
}

/// Shared-secret signer: lowercase hex sha256 over `secret:t:m`.
pub struct SharedSecretSigner {
    secret: String,
}

impl SharedSecretSigner {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl RequestSigner for SharedSecretSigner {
    async fn sign(&self, payload: &SignPayload) -> Result<String> {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(payload.t.to_string().as_bytes());
        hasher.update(b":");
        hasher.update(payload.m.as_bytes());
        Ok(format!("{:x}", hasher.finalize()))
    }
}

/// Signer that always fails, for exercising the signing failure path.
pub struct FailingSigner;

#[async_trait]
impl RequestSigner for FailingSigner {
    async fn sign(&self, _payload: &SignPayload) -> Result<String> {
        Err(ChatError::Signing("signer unavailable".to_string()))
    }
}
