//! OpenAI client configuration.
//!
//! Credentials are always passed in explicitly; nothing here reads or writes
//! the process environment.

use crate::error::{Result, VidaskError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// API credentials for the OpenAI provider.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
}

impl Credentials {
    /// Wrap an API key. Blank keys are rejected.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(VidaskError::Config(
                "OpenAI API key is empty. Pass --api-key or set OPENAI_API_KEY.".to_string(),
            ));
        }
        Ok(Self { api_key })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Transport options shared by every client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Override for OpenAI-compatible endpoints.
    pub api_base: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Create an OpenAI client for the given credentials.
pub fn create_client(
    credentials: &Credentials,
    options: &ClientOptions,
) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder().timeout(options.timeout).build()?;

    let mut config = OpenAIConfig::new().with_api_key(credentials.api_key());
    if let Some(api_base) = &options.api_base {
        config = config.with_api_base(api_base);
    }

    Ok(Client::with_config(config).with_http_client(http_client))
}
