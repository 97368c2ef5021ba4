//! Building the searchable index for one video.
//!
//! The indexer embeds every chunk of a transcript and wraps the result in a
//! [`BuiltIndex`]. A build either completes or returns an error; there is no
//! partially built index to clean up.

mod cache;

pub use cache::IndexCache;

use crate::chunking::{Chunk, ChunkingConfig};
use crate::config::{validate_chunking, EmbeddingModel, Settings};
use crate::embedding::Embedder;
use crate::error::{Result, VidaskError};
use crate::source::VideoReference;
use crate::transcript::{normalize_languages, Transcript};
use crate::vector_store::{Document, MemoryVectorStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Everything that determines the outcome of a build, apart from the video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildParams {
    /// Transcript languages in priority order.
    pub languages: Vec<String>,
    /// Chunk size and overlap.
    pub chunking: ChunkingConfig,
    /// Model used for chunk and query embeddings.
    pub embedding_model: EmbeddingModel,
}

impl BuildParams {
    /// Parameters configured in `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let params = Self {
            languages: normalize_languages(settings.transcript.languages.clone()),
            chunking: ChunkingConfig::new(
                settings.chunking.chunk_size,
                settings.chunking.chunk_overlap,
            )?,
            embedding_model: settings.embedding.model,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check chunking against the user-facing ranges.
    pub fn validate(&self) -> Result<()> {
        validate_chunking(self.chunking.chunk_size, self.chunking.chunk_overlap)
    }

    /// Cache key for building `video_id` with these parameters.
    pub fn key(&self, video_id: &VideoReference) -> BuildKey {
        BuildKey {
            video_id: video_id.clone(),
            languages: normalize_languages(self.languages.clone()),
            chunk_size: self.chunking.chunk_size,
            chunk_overlap: self.chunking.chunk_overlap,
            embedding_model: self.embedding_model,
        }
    }
}

/// Content address of a build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BuildKey {
    pub video_id: VideoReference,
    pub languages: Vec<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embedding_model: EmbeddingModel,
}

/// Summary of a build, shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetadata {
    pub video_id: VideoReference,
    pub languages: Vec<String>,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub embedding_model: EmbeddingModel,
    pub num_chunks: usize,
    /// Transcript length in characters.
    pub transcript_chars: usize,
    pub built_at: DateTime<Utc>,
}

/// A finished, immutable index for one video.
#[derive(Debug, Clone)]
pub struct BuiltIndex {
    store: Arc<MemoryVectorStore>,
    metadata: IndexMetadata,
}

impl BuiltIndex {
    pub fn store(&self) -> &Arc<MemoryVectorStore> {
        &self.store
    }

    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    /// The model queries against this index must be embedded with.
    pub fn embedding_model(&self) -> EmbeddingModel {
        self.metadata.embedding_model
    }

    pub fn video_id(&self) -> &VideoReference {
        &self.metadata.video_id
    }
}

/// Embeds chunks and assembles the vector index.
pub struct Indexer {
    embedder: Arc<dyn Embedder>,
}

impl Indexer {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Embed `chunks` of `transcript` and build the index.
    ///
    /// Provider failures are returned as-is; nothing is retried.
    #[instrument(skip_all, fields(video_id = %transcript.video_id, chunks = chunks.len()))]
    pub async fn build(
        &self,
        transcript: &Transcript,
        chunks: Vec<Chunk>,
        params: &BuildParams,
    ) -> Result<BuiltIndex> {
        let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(VidaskError::Embedding(format!(
                "Provider returned {} embeddings for {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let documents: Vec<Document> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| {
                let start_seconds = transcript.start_seconds_at(chunk.char_offset);
                Document::new(chunk, start_seconds, embedding)
            })
            .collect();

        let store = MemoryVectorStore::from_documents(documents)?;

        let metadata = IndexMetadata {
            video_id: transcript.video_id.clone(),
            languages: params.languages.clone(),
            chunk_size: params.chunking.chunk_size,
            chunk_overlap: params.chunking.chunk_overlap,
            embedding_model: params.embedding_model,
            num_chunks: store.len(),
            transcript_chars: transcript.char_count(),
            built_at: Utc::now(),
        };

        info!(
            "Indexed {} chunks ({} dims) with {}",
            metadata.num_chunks,
            store.dimensions(),
            metadata.embedding_model
        );

        Ok(BuiltIndex {
            store: Arc::new(store),
            metadata,
        })
    }
}
