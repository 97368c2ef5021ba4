//! CLI module for Vidask.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use crate::chunking::ChunkingConfig;
use crate::config::{ChatModelName, EmbeddingModel, Settings};
use crate::error::Result;
use crate::indexer::BuildParams;
use crate::orchestrator::QueryParams;
use crate::transcript::parse_languages;
use clap::{Args, Parser, Subcommand};

/// Vidask - ask questions about a YouTube video
///
/// Fetches the video's transcript, indexes it, and answers questions using only
/// what was said in the video.
#[derive(Parser, Debug)]
#[command(name = "vidask")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and index a video's transcript, then print the index metadata
    Index {
        /// YouTube URL or 11-character video id
        video: String,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Ask a single question about a video
    Ask {
        /// YouTube URL or 11-character video id
        video: String,

        /// The question to ask
        question: String,

        #[command(flatten)]
        build: BuildArgs,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Start an interactive chat about a video
    Chat {
        /// YouTube URL or 11-character video id
        video: String,

        #[command(flatten)]
        build: BuildArgs,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Options that change how the index is built.
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Transcript languages in priority order, comma-separated (e.g. "en,hi")
    #[arg(short, long)]
    pub languages: Option<String>,

    /// Maximum chunk size in characters (300-2000)
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Overlap between chunks in characters (0-500)
    #[arg(long)]
    pub chunk_overlap: Option<usize>,

    /// Embedding model (text-embedding-3-small, text-embedding-3-large)
    #[arg(short, long)]
    pub embedding_model: Option<EmbeddingModel>,
}

impl BuildArgs {
    /// Settings overridden by whatever was given on the command line.
    pub fn resolve(&self, settings: &Settings) -> Result<BuildParams> {
        let defaults = BuildParams::from_settings(settings)?;

        let params = BuildParams {
            languages: match &self.languages {
                Some(languages) => parse_languages(languages),
                None => defaults.languages,
            },
            chunking: ChunkingConfig::new(
                self.chunk_size.unwrap_or(defaults.chunking.chunk_size),
                self.chunk_overlap.unwrap_or(defaults.chunking.chunk_overlap),
            )?,
            embedding_model: self.embedding_model.unwrap_or(defaults.embedding_model),
        };
        params.validate()?;
        Ok(params)
    }
}

/// Options that apply to each question.
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Number of transcript chunks to retrieve (1-10)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Chat model (gpt-4o-mini, gpt-4o, gpt-4.1-mini)
    #[arg(short, long)]
    pub model: Option<ChatModelName>,

    /// Sampling temperature (0.0-1.0)
    #[arg(short, long)]
    pub temperature: Option<f32>,
}

impl QueryArgs {
    /// Settings overridden by whatever was given on the command line.
    pub fn resolve(&self, settings: &Settings) -> Result<QueryParams> {
        let defaults = QueryParams::from_settings(settings)?;

        let params = QueryParams {
            top_k: self.top_k.unwrap_or(defaults.top_k),
            chat_model: self.model.unwrap_or(defaults.chat_model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
        };
        params.validate()?;
        Ok(params)
    }
}
