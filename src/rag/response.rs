//! RAG response generation.

use super::{context::format_context_for_prompt, ContextChunk};
use crate::chat::{ChatMessage, ChatModel};
use crate::config::Prompts;
use crate::error::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// RAG engine for question answering.
pub struct RagEngine {
    chat: Arc<dyn ChatModel>,
    prompts: Prompts,
    temperature: f32,
}

impl RagEngine {
    pub fn new(chat: Arc<dyn ChatModel>, prompts: Prompts, temperature: f32) -> Self {
        Self {
            chat,
            prompts,
            temperature,
        }
    }

    /// Fill the answer template with the question and retrieved context.
    pub fn build_prompt(&self, question: &str, chunks: &[ContextChunk]) -> String {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.to_string());
        vars.insert("context".to_string(), format_context_for_prompt(chunks));

        self.prompts.render_with_custom(&self.prompts.rag.user, &vars)
    }

    /// Answer `question` from `chunks`. The model's text is returned verbatim.
    #[instrument(skip(self, chunks), fields(model = self.chat.name(), chunks = chunks.len()))]
    pub async fn answer(&self, question: &str, chunks: Vec<ContextChunk>) -> Result<RagResponse> {
        let prompt = self.build_prompt(question, &chunks);

        let answer = self
            .chat
            .complete(&[ChatMessage::user(prompt)], self.temperature)
            .await?;

        debug!("Generated response with {} sources", chunks.len());

        Ok(RagResponse {
            answer,
            sources: chunks,
        })
    }
}

/// A RAG response with answer and sources.
#[derive(Debug, Clone, Serialize)]
pub struct RagResponse {
    /// The generated answer.
    pub answer: String,
    /// Source chunks used for the answer, in retrieval order.
    pub sources: Vec<ContextChunk>,
}
