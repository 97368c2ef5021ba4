//! Pre-flight checks before expensive operations.
//!
//! Validates that the configuration needed by the providers is present before
//! starting a build that would otherwise fail midway.

use crate::error::{Result, VidaskError};
use crate::openai::Credentials;

/// Credentials from the `--api-key` flag (or `OPENAI_API_KEY`, read by clap).
pub fn credentials(api_key: Option<&str>) -> Result<Credentials> {
    match api_key {
        Some(key) if !key.trim().is_empty() => Credentials::new(key),
        Some(_) => Err(VidaskError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        None => Err(VidaskError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...' or pass --api-key"
                .to_string(),
        )),
    }
}
