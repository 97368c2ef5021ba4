//! Offline stand-ins for the external services, used by unit tests.

use crate::chat::{ChatMessage, ChatModel};
use crate::config::{ChatModelName, EmbeddingModel};
use crate::embedding::Embedder;
use crate::error::{Result, VidaskError};
use crate::provider::ModelProvider;
use crate::source::VideoReference;
use crate::transcript::{TranscriptSegment, TranscriptSource};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

const HASH_DIMENSIONS: usize = 64;

/// Deterministic embedder: counts of each lowercase letter and digit, hashed into 64 buckets.
#[derive(Debug, Default)]
pub(crate) struct HashEmbedder;

impl HashEmbedder {
    fn vector(text: &str) -> Vec<f32> {
        let mut v = vec![0.0; HASH_DIMENSIONS];
        for c in text.chars().flat_map(char::to_lowercase) {
            if c.is_alphanumeric() {
                v[(c as usize) % HASH_DIMENSIONS] += 1.0;
            }
        }
        v
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(Self::vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| Self::vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        HASH_DIMENSIONS
    }
}

/// Embedder that rejects every request, like a provider with a bad key.
#[derive(Debug)]
pub(crate) struct FailingEmbedder {
    message: String,
}

impl FailingEmbedder {
    pub(crate) fn unauthorized() -> Self {
        Self {
            message: "Embedding API error: invalid_api_key: Incorrect API key provided".to_string(),
        }
    }
}

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Err(VidaskError::Embedding(self.message.clone()))
    }

    async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(VidaskError::Embedding(self.message.clone()))
    }

    fn dimensions(&self) -> usize {
        HASH_DIMENSIONS
    }
}

#[derive(Debug)]
enum StubTranscript {
    Segments(Vec<TranscriptSegment>),
    Unavailable(String),
    ServiceDown(String),
}

/// Transcript source serving canned segments or a canned failure.
#[derive(Debug)]
pub(crate) struct StubTranscriptSource {
    outcome: StubTranscript,
    requests: Mutex<Vec<Vec<String>>>,
}

impl StubTranscriptSource {
    pub(crate) fn with_segments(segments: Vec<TranscriptSegment>) -> Self {
        Self {
            outcome: StubTranscript::Segments(segments),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A single segment holding `text`.
    pub(crate) fn with_text(text: impl Into<String>) -> Self {
        Self::with_segments(vec![TranscriptSegment::new(text, 0.0, 1.0)])
    }

    pub(crate) fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            outcome: StubTranscript::Unavailable(reason.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails like a network outage.
    pub(crate) fn service_down(message: impl Into<String>) -> Self {
        Self {
            outcome: StubTranscript::ServiceDown(message.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Language lists of every fetch so far.
    pub(crate) fn requested_languages(&self) -> Vec<Vec<String>> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TranscriptSource for StubTranscriptSource {
    async fn fetch(
        &self,
        video_id: &VideoReference,
        languages: &[String],
    ) -> Result<Vec<TranscriptSegment>> {
        self.requests.lock().unwrap().push(languages.to_vec());
        match &self.outcome {
            StubTranscript::Segments(segments) => Ok(segments.clone()),
            StubTranscript::Unavailable(reason) => Err(VidaskError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: reason.clone(),
            }),
            StubTranscript::ServiceDown(message) => {
                Err(VidaskError::TranscriptService(message.clone()))
            }
        }
    }
}

/// Chat model returning a fixed reply and recording what it was sent.
#[derive(Debug)]
pub(crate) struct StubChatModel {
    reply: std::result::Result<String, String>,
    received: Mutex<Vec<(Vec<ChatMessage>, f32)>>,
}

impl StubChatModel {
    pub(crate) fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Messages and temperature of every request so far.
    pub(crate) fn received(&self) -> Vec<(Vec<ChatMessage>, f32)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for StubChatModel {
    async fn complete(&self, messages: &[ChatMessage], temperature: f32) -> Result<String> {
        self.received
            .lock()
            .unwrap()
            .push((messages.to_vec(), temperature));
        self.reply.clone().map_err(VidaskError::Generation)
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Provider wiring the stubs together.
pub(crate) struct StubProvider {
    pub(crate) embedder: Arc<dyn Embedder>,
    pub(crate) chat: Arc<StubChatModel>,
    requested_embedders: Mutex<Vec<EmbeddingModel>>,
}

impl StubProvider {
    pub(crate) fn new(embedder: Arc<dyn Embedder>, chat: StubChatModel) -> Self {
        Self {
            embedder,
            chat: Arc::new(chat),
            requested_embedders: Mutex::new(Vec::new()),
        }
    }

    /// Hash embedder and a chat model that always says "I don't know."
    pub(crate) fn offline() -> Self {
        Self::new(
            Arc::new(HashEmbedder::default()),
            StubChatModel::replying("I don't know."),
        )
    }

    pub(crate) fn requested_embedders(&self) -> Vec<EmbeddingModel> {
        self.requested_embedders.lock().unwrap().clone()
    }
}

impl ModelProvider for StubProvider {
    fn embedder(&self, model: EmbeddingModel) -> Result<Arc<dyn Embedder>> {
        self.requested_embedders.lock().unwrap().push(model);
        Ok(self.embedder.clone())
    }

    fn chat_model(&self, _model: ChatModelName) -> Result<Arc<dyn ChatModel>> {
        let chat: Arc<dyn ChatModel> = self.chat.clone();
        Ok(chat)
    }
}
