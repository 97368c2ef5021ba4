//! Model provider: hands out embedders and chat models by name.

use crate::chat::{ChatModel, OpenAIChatModel};
use crate::config::{ChatModelName, EmbeddingModel};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::Result;
use crate::openai::{ClientOptions, Credentials};
use std::sync::Arc;

/// Source of the models the pipeline talks to.
pub trait ModelProvider: Send + Sync {
    /// Embedder for `model`. Indexes and their queries must use the same one.
    fn embedder(&self, model: EmbeddingModel) -> Result<Arc<dyn Embedder>>;

    /// Chat model used to compose answers.
    fn chat_model(&self, model: ChatModelName) -> Result<Arc<dyn ChatModel>>;
}

/// Provider backed by the OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    credentials: Credentials,
    options: ClientOptions,
}

impl OpenAIProvider {
    pub fn new(credentials: Credentials, options: ClientOptions) -> Self {
        Self {
            credentials,
            options,
        }
    }
}

impl ModelProvider for OpenAIProvider {
    fn embedder(&self, model: EmbeddingModel) -> Result<Arc<dyn Embedder>> {
        Ok(Arc::new(OpenAIEmbedder::new(
            model,
            &self.credentials,
            &self.options,
        )?))
    }

    fn chat_model(&self, model: ChatModelName) -> Result<Arc<dyn ChatModel>> {
        Ok(Arc::new(OpenAIChatModel::new(
            model,
            &self.credentials,
            &self.options,
        )?))
    }
}
