//! Pipeline orchestrator for Vidask.
//!
//! Runs the build phase (video reference to index) and the query phase
//! (question to grounded answer) against a caller-owned [`Session`] and
//! [`IndexCache`]. Stages run one after another; a failure at any stage leaves
//! both untouched.

use crate::chunking::RecursiveChunker;
use crate::config::{validate_temperature, validate_top_k, ChatModelName, Prompts, Settings};
use crate::error::Result;
use crate::indexer::{BuildParams, BuiltIndex, IndexCache, IndexMetadata, Indexer};
use crate::provider::ModelProvider;
use crate::rag::{ContextBuilder, RagEngine, RagResponse};
use crate::session::Session;
use crate::source::extract_video_id;
use crate::transcript::{fetch_transcript, TranscriptSource};
use crate::vector_store::VectorStore;
use std::sync::Arc;
use tracing::{info, instrument};

/// Per-question parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    /// Number of chunks to retrieve.
    pub top_k: usize,
    pub chat_model: ChatModelName,
    pub temperature: f32,
}

impl QueryParams {
    /// Parameters configured in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let params = Self {
            top_k: settings.retrieval.top_k,
            chat_model: settings.chat.model,
            temperature: settings.chat.temperature,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        validate_top_k(self.top_k)?;
        validate_temperature(self.temperature)
    }
}

/// Result of a build request.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub metadata: IndexMetadata,
    /// Whether the index came from the cache instead of being built.
    pub cached: bool,
}

/// The main orchestrator for the Vidask pipeline.
pub struct Orchestrator {
    prompts: Prompts,
    transcripts: Arc<dyn TranscriptSource>,
    provider: Arc<dyn ModelProvider>,
}

impl Orchestrator {
    /// Create an orchestrator, loading prompts as configured in `settings`.
    pub fn new(
        settings: &Settings,
        transcripts: Arc<dyn TranscriptSource>,
        provider: Arc<dyn ModelProvider>,
    ) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Ok(Self::with_prompts(prompts, transcripts, provider))
    }

    /// Create an orchestrator with explicit prompts.
    pub fn with_prompts(
        prompts: Prompts,
        transcripts: Arc<dyn TranscriptSource>,
        provider: Arc<dyn ModelProvider>,
    ) -> Self {
        Self {
            prompts,
            transcripts,
            provider,
        }
    }

    /// Build (or reuse) the index for `input` and make it the session's index.
    #[instrument(skip(self, session, cache, params), fields(input = %input))]
    pub async fn build(
        &self,
        session: &mut Session,
        cache: &mut IndexCache,
        input: &str,
        params: &BuildParams,
    ) -> Result<BuildOutcome> {
        params.validate()?;
        let chunker = RecursiveChunker::new(params.chunking)?;
        let video_id = extract_video_id(input)?;
        let key = params.key(&video_id);

        if let Some(index) = cache.get(&key) {
            info!("Reusing cached index for {}", video_id);
            let metadata = index.metadata().clone();
            session.set_index(index);
            return Ok(BuildOutcome {
                metadata,
                cached: true,
            });
        }

        let transcript =
            fetch_transcript(self.transcripts.as_ref(), &video_id, &params.languages).await?;

        let chunks = chunker.split(&transcript.full_text);
        info!("Split transcript into {} chunks", chunks.len());

        let embedder = self.provider.embedder(params.embedding_model)?;
        let index = Indexer::new(embedder)
            .build(&transcript, chunks, params)
            .await?;

        let index = Arc::new(index);
        let metadata = index.metadata().clone();
        cache.insert(key, index.clone());
        session.set_index(index);

        Ok(BuildOutcome {
            metadata,
            cached: false,
        })
    }

    /// Answer `question` from the session's index and record the exchange.
    ///
    /// Retrieval and generation failures are recorded in the history as
    /// `"Error: <message>"` and then returned.
    #[instrument(skip(self, session, params), fields(question = %question))]
    pub async fn ask(
        &self,
        session: &mut Session,
        question: &str,
        params: &QueryParams,
    ) -> Result<RagResponse> {
        params.validate()?;
        let index = session.index()?.clone();

        let result = self.answer(&index, question, params).await;
        session.record_exchange(question, result.as_ref().map(|r| r.answer.as_str()));
        result
    }

    async fn answer(
        &self,
        index: &BuiltIndex,
        question: &str,
        params: &QueryParams,
    ) -> Result<RagResponse> {
        let embedder = self.provider.embedder(index.embedding_model())?;
        let store: Arc<dyn VectorStore> = index.store().clone();

        let chunks = ContextBuilder::new(index.video_id().clone(), store, embedder)
            .with_max_chunks(params.top_k)?
            .retrieve(question)
            .await?;

        let chat = self.provider.chat_model(params.chat_model)?;
        RagEngine::new(chat, self.prompts.clone(), params.temperature)
            .answer(question, chunks)
            .await
    }
}
