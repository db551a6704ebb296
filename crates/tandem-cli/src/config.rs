//! CLI configuration file support
//!
//! Loads configuration from ~/.config/tandem/config.toml

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_SERVER: &str = "http://localhost:3000";
const DEFAULT_MAX_HISTORY: usize = 99;

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Default settings
    #[serde(default)]
    pub default: DefaultConfig,
    /// Auth settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Endpoint overrides
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Default configuration values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultConfig {
    /// Default database path
    pub db_path: Option<String>,
    /// Base URL of the generation server
    pub server: Option<String>,
    /// Maximum history messages per request window
    pub max_history: Option<usize>,
}

/// Auth configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to sign each request
    pub secret: Option<String>,
    /// Optional access password forwarded with each request
    pub pass: Option<String>,
}

/// Per-provider endpoint overrides; defaults derive from the server URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub gemini: Option<String>,
    pub openai: Option<String>,
}

impl CliConfig {
    /// Load configuration from default path
    pub fn load() -> Self {
        Self::load_from_path(Self::default_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tandem").join("config.toml"))
    }

    pub fn server(&self) -> &str {
        self.default.server.as_deref().unwrap_or(DEFAULT_SERVER)
    }

    pub fn max_history(&self) -> usize {
        self.default.max_history.unwrap_or(DEFAULT_MAX_HISTORY)
    }

    /// Resolved Gemini endpoint
    pub fn gemini_endpoint(&self) -> String {
        self.endpoints
            .gemini
            .clone()
            .unwrap_or_else(|| format!("{}/api/generate", self.server()))
    }

    /// Resolved OpenAI endpoint
    pub fn openai_endpoint(&self) -> String {
        self.endpoints
            .openai
            .clone()
            .unwrap_or_else(|| format!("{}/api/generate_chatgpt", self.server()))
    }
}
