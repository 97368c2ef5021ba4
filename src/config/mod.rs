//! Configuration module for Vidask.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RagPrompts};
pub use settings::{
    validate_chunking, validate_temperature, validate_top_k, ChatModelName, ChatSettings,
    ChunkingSettings, EmbeddingModel, EmbeddingSettings, GeneralSettings, OpenAISettings,
    PromptSettings, RetrievalSettings, Settings, TranscriptSettings, CHUNK_OVERLAP_RANGE,
    CHUNK_SIZE_RANGE, TEMPERATURE_RANGE, TOP_K_RANGE,
};
