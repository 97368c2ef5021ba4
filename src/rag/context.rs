//! Retrieval of the chunks that answer a question.

use super::ContextChunk;
use crate::embedding::Embedder;
use crate::error::{Result, VidaskError};
use crate::source::VideoReference;
use crate::vector_store::VectorStore;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of chunks handed to the chat model.
pub const DEFAULT_MAX_CHUNKS: usize = 4;

/// Finds the chunks of one video most similar to a query.
pub struct ContextBuilder {
    video_id: VideoReference,
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    max_chunks: usize,
}

impl ContextBuilder {
    /// `embedder` must be the one the store was built with.
    pub fn new(
        video_id: VideoReference,
        vector_store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            video_id,
            vector_store,
            embedder,
            max_chunks: DEFAULT_MAX_CHUNKS,
        }
    }

    /// Set the number of chunks to retrieve. Must be at least 1.
    pub fn with_max_chunks(mut self, max_chunks: usize) -> Result<Self> {
        if max_chunks == 0 {
            return Err(VidaskError::InvalidInput(
                "top-k must be at least 1".to_string(),
            ));
        }
        self.max_chunks = max_chunks;
        Ok(self)
    }

    /// The `max_chunks` most similar chunks, best first. Ties keep transcript order.
    #[instrument(skip(self), fields(video_id = %self.video_id, k = self.max_chunks))]
    pub async fn retrieve(&self, query: &str) -> Result<Vec<ContextChunk>> {
        let query_embedding = self.embedder.embed(query).await?;

        let results = self
            .vector_store
            .search(&query_embedding, self.max_chunks)
            .await?;

        debug!("Retrieved {} chunks", results.len());

        Ok(results
            .into_iter()
            .map(|r| ContextChunk::from_result(&self.video_id, r))
            .collect())
    }
}

/// Chunk contents in retrieval order, separated by blank lines.
pub fn format_context_for_prompt(chunks: &[ContextChunk]) -> String {
    chunks
        .iter()
        .map(|chunk| chunk.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}
