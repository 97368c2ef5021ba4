//! Configuration settings for Vidask.

use crate::error::{Result, VidaskError};
use crate::openai::{ClientOptions, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::time::Duration;

/// Allowed chunk sizes, in characters.
pub const CHUNK_SIZE_RANGE: RangeInclusive<usize> = 300..=2000;
/// Allowed chunk overlaps, in characters.
pub const CHUNK_OVERLAP_RANGE: RangeInclusive<usize> = 0..=500;
/// Allowed number of retrieved chunks.
pub const TOP_K_RANGE: RangeInclusive<usize> = 1..=10;
/// Allowed generation temperatures.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcript: TranscriptSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub embedding: EmbeddingSettings,
    pub chat: ChatSettings,
    pub openai: OpenAISettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Transcript fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Preferred transcript languages, in priority order.
    pub languages: Vec<String>,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            languages: vec![crate::transcript::DEFAULT_LANGUAGE.to_string()],
        }
    }
}

/// Text chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Maximum chunk size in characters.
    pub chunk_size: usize,
    /// Overlap between neighbouring chunks in characters.
    pub chunk_overlap: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Number of chunks handed to the chat model.
    pub top_k: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 4 }
    }
}

/// Supported embedding models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmbeddingModel {
    #[default]
    #[serde(rename = "text-embedding-3-small")]
    TextEmbedding3Small,
    #[serde(rename = "text-embedding-3-large")]
    TextEmbedding3Large,
}

impl EmbeddingModel {
    pub const ALL: [EmbeddingModel; 2] = [
        EmbeddingModel::TextEmbedding3Small,
        EmbeddingModel::TextEmbedding3Large,
    ];

    /// API model name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
        }
    }

    /// Native vector size of the model.
    pub fn dimensions(&self) -> usize {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
        }
    }
}

impl std::str::FromStr for EmbeddingModel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown embedding model: {} (expected one of: {})",
                    s,
                    Self::ALL.map(|m| m.as_str()).join(", ")
                )
            })
    }
}

impl std::fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported chat models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ChatModelName {
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
}

impl ChatModelName {
    pub const ALL: [ChatModelName; 3] = [
        ChatModelName::Gpt4oMini,
        ChatModelName::Gpt4o,
        ChatModelName::Gpt41Mini,
    ];

    /// API model name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatModelName::Gpt4oMini => "gpt-4o-mini",
            ChatModelName::Gpt4o => "gpt-4o",
            ChatModelName::Gpt41Mini => "gpt-4.1-mini",
        }
    }
}

impl std::str::FromStr for ChatModelName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "Unknown chat model: {} (expected one of: {})",
                    s,
                    Self::ALL.map(|m| m.as_str()).join(", ")
                )
            })
    }
}

impl std::fmt::Display for ChatModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: EmbeddingModel,
}

/// Answer generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Chat model for answer generation.
    pub model: ChatModelName,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            model: ChatModelName::default(),
            temperature: 0.0,
        }
    }
}

/// OpenAI transport settings. The API key is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// Base URL override for OpenAI-compatible endpoints.
    pub api_base: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OpenAISettings {
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VidaskError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidask")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Check every tunable against its allowed range.
    pub fn validate(&self) -> Result<()> {
        validate_chunking(self.chunking.chunk_size, self.chunking.chunk_overlap)?;
        validate_top_k(self.retrieval.top_k)?;
        validate_temperature(self.chat.temperature)?;
        if self.openai.timeout_secs == 0 {
            return Err(VidaskError::Config(
                "openai.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn validate_chunking(chunk_size: usize, chunk_overlap: usize) -> Result<()> {
    if !CHUNK_SIZE_RANGE.contains(&chunk_size) {
        return Err(VidaskError::Config(format!(
            "chunk size {} is outside {}..={}",
            chunk_size,
            CHUNK_SIZE_RANGE.start(),
            CHUNK_SIZE_RANGE.end()
        )));
    }
    if !CHUNK_OVERLAP_RANGE.contains(&chunk_overlap) {
        return Err(VidaskError::Config(format!(
            "chunk overlap {} is outside {}..={}",
            chunk_overlap,
            CHUNK_OVERLAP_RANGE.start(),
            CHUNK_OVERLAP_RANGE.end()
        )));
    }
    if chunk_overlap >= chunk_size {
        return Err(VidaskError::Config(format!(
            "chunk overlap {} must be smaller than chunk size {}",
            chunk_overlap, chunk_size
        )));
    }
    Ok(())
}

pub fn validate_top_k(top_k: usize) -> Result<()> {
    if !TOP_K_RANGE.contains(&top_k) {
        return Err(VidaskError::Config(format!(
            "top-k {} is outside {}..={}",
            top_k,
            TOP_K_RANGE.start(),
            TOP_K_RANGE.end()
        )));
    }
    Ok(())
}

pub fn validate_temperature(temperature: f32) -> Result<()> {
    if !TEMPERATURE_RANGE.contains(&temperature) {
        return Err(VidaskError::Config(format!(
            "temperature {} is outside {}..={}",
            temperature,
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.transcript.languages, vec!["en"]);
        assert_eq!(settings.chunking.chunk_size, 1000);
        assert_eq!(settings.chunking.chunk_overlap, 200);
        assert_eq!(settings.retrieval.top_k, 4);
        assert_eq!(settings.embedding.model, EmbeddingModel::TextEmbedding3Small);
        assert_eq!(settings.chat.model, ChatModelName::Gpt4oMini);
        assert_eq!(settings.chat.temperature, 0.0);
    }

    #[test]
    fn test_range_validation() {
        assert!(validate_chunking(299, 0).is_err());
        assert!(validate_chunking(2001, 0).is_err());
        assert!(validate_chunking(400, 501).is_err());
        assert!(validate_chunking(300, 300).is_err());
        assert!(validate_chunking(300, 299).is_ok());
        assert!(validate_top_k(0).is_err());
        assert!(validate_top_k(11).is_err());
        assert!(validate_top_k(10).is_ok());
        assert!(validate_temperature(1.5).is_err());
        assert!(validate_temperature(-0.1).is_err());
        assert!(validate_temperature(0.35).is_ok());
    }

    #[test]
    fn test_model_names() {
        assert_eq!(
            "text-embedding-3-large".parse::<EmbeddingModel>().unwrap(),
            EmbeddingModel::TextEmbedding3Large
        );
        assert_eq!(EmbeddingModel::TextEmbedding3Large.dimensions(), 3072);
        assert_eq!("gpt-4.1-mini".parse::<ChatModelName>().unwrap(), ChatModelName::Gpt41Mini);
        assert!("gpt-2".parse::<ChatModelName>().is_err());
        assert_eq!(ChatModelName::Gpt4o.to_string(), "gpt-4o");
    }

    #[test]
    fn test_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [chunking]
            chunk_size = 500

            [embedding]
            model = "text-embedding-3-large"
            "#,
        )
        .unwrap();

        assert_eq!(settings.chunking.chunk_size, 500);
        assert_eq!(settings.chunking.chunk_overlap, 200);
        assert_eq!(settings.embedding.model, EmbeddingModel::TextEmbedding3Large);
        assert_eq!(settings.chat.model, ChatModelName::Gpt4oMini);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.transcript.languages = vec!["en".to_string(), "hi".to_string()];
        settings.chat.model = ChatModelName::Gpt4o;
        settings.openai.api_base = Some("http://localhost:8080/v1".to_string());
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.transcript.languages, vec!["en", "hi"]);
        assert_eq!(loaded.chat.model, ChatModelName::Gpt4o);
        assert_eq!(loaded.openai.api_base.as_deref(), Some("http://localhost:8080/v1"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings.retrieval.top_k, 4);
    }
}
