//! In-memory vector store implementation.
//!
//! Brute-force cosine search over documents kept in chunk order, which is
//! plenty for the few hundred chunks of a single transcript.

use super::{cosine_similarity, Document, SearchResult, VectorStore};
use crate::error::{Result, VidaskError};
use async_trait::async_trait;

/// In-memory vector store. Immutable once built.
#[derive(Debug, Clone)]
pub struct MemoryVectorStore {
    documents: Vec<Document>,
    dimensions: usize,
}

impl MemoryVectorStore {
    /// Build a store from documents. All embeddings must share one dimension.
    pub fn from_documents(mut documents: Vec<Document>) -> Result<Self> {
        documents.sort_by_key(|d| d.chunk_order);

        let dimensions = documents.first().map(|d| d.embedding.len()).unwrap_or(0);
        if let Some(bad) = documents.iter().find(|d| d.embedding.len() != dimensions) {
            return Err(VidaskError::Embedding(format!(
                "Chunk {} has a {}-dimensional embedding, expected {}",
                bad.chunk_order,
                bad.embedding.len(),
                dimensions
            )));
        }

        Ok(Self {
            documents,
            dimensions,
        })
    }

    /// Embedding dimension of the stored documents.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.search_with_threshold(query_embedding, limit, f32::NEG_INFINITY)
            .await
    }

    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>> {
        let mut results: Vec<SearchResult> = self
            .documents
            .iter()
            .map(|doc| SearchResult {
                document: doc.clone(),
                score: cosine_similarity(query_embedding, &doc.embedding),
            })
            .filter(|r| r.score >= min_score)
            .collect();

        // Equal scores keep chunk order.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.document.chunk_order.cmp(&b.document.chunk_order))
        });
        results.truncate(limit);

        Ok(results)
    }

    async fn documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }

    async fn document_count(&self) -> Result<usize> {
        Ok(self.documents.len())
    }
}
