//! Vidask - question answering over YouTube transcripts
//!
//! Paste a video link, and Vidask fetches the transcript, splits it into
//! overlapping chunks, embeds them into an in-memory index, and answers
//! questions using only what was said in the video.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `source` - Video reference parsing
//! - `transcript` - Transcript fetching
//! - `chunking` - Overlapping text chunks
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory similarity search
//! - `indexer` - Index builds and the build cache
//! - `chat` - Chat-completion models
//! - `rag` - Retrieval and grounded answers
//! - `session` - Current index and conversation history
//! - `orchestrator` - Pipeline coordination
//! - `config` - Configuration management
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vidask::config::Settings;
//! use vidask::indexer::{BuildParams, IndexCache};
//! use vidask::openai::Credentials;
//! use vidask::orchestrator::{Orchestrator, QueryParams};
//! use vidask::provider::OpenAIProvider;
//! use vidask::session::Session;
//! use vidask::transcript::YoutubeTranscriptSource;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let provider = OpenAIProvider::new(
//!         Credentials::new("sk-...")?,
//!         settings.openai.client_options(),
//!     );
//!     let orchestrator = Orchestrator::new(
//!         &settings,
//!         Arc::new(YoutubeTranscriptSource::new()),
//!         Arc::new(provider),
//!     )?;
//!
//!     let mut session = Session::new();
//!     let mut cache = IndexCache::new();
//!     let params = BuildParams::from_settings(&settings)?;
//!     orchestrator
//!         .build(&mut session, &mut cache, "https://youtu.be/dQw4w9WgXcQ", &params)
//!         .await?;
//!
//!     let query = QueryParams::from_settings(&settings)?;
//!     let response = orchestrator.ask(&mut session, "What is promised?", &query).await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod indexer;
pub mod openai;
pub mod orchestrator;
pub mod provider;
pub mod rag;
pub mod session;
pub mod source;
pub mod transcript;
pub mod vector_store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Result, VidaskError};
