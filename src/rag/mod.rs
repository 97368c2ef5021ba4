//! RAG (Retrieval-Augmented Generation) for question answering with sources.
//!
//! [`ContextBuilder`] finds the transcript chunks closest to a question and
//! [`RagEngine`] turns them into a grounded prompt for the chat model.

pub mod context;
mod response;

pub use context::ContextBuilder;
pub use response::{RagEngine, RagResponse};

use crate::source::VideoReference;
use crate::vector_store::SearchResult;
use serde::Serialize;

/// A retrieved chunk, ready for prompting and display.
#[derive(Debug, Clone, Serialize)]
pub struct ContextChunk {
    /// Position of the chunk in the transcript.
    pub chunk_order: usize,
    /// Offset of the chunk within the transcript text, in characters.
    pub char_offset: usize,
    /// Formatted timestamp (e.g., "02:34").
    pub timestamp: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Text content.
    pub content: String,
    /// Cosine similarity to the question.
    pub score: f32,
    /// Watch URL starting at this chunk.
    pub url: String,
}

impl ContextChunk {
    pub fn from_result(video_id: &VideoReference, result: SearchResult) -> Self {
        let doc = result.document;
        Self {
            timestamp: doc.format_timestamp(),
            url: video_id.url_with_timestamp(doc.start_seconds),
            chunk_order: doc.chunk_order,
            char_offset: doc.char_offset,
            start_seconds: doc.start_seconds,
            content: doc.content,
            score: result.score,
        }
    }
}
