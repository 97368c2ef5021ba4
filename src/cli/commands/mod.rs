//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod index;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use index::run_index;

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::indexer::{BuildParams, IndexCache};
use crate::orchestrator::{BuildOutcome, Orchestrator};
use crate::provider::OpenAIProvider;
use crate::session::Session;
use crate::transcript::YoutubeTranscriptSource;
use anyhow::Result;
use std::sync::Arc;

/// Wire the YouTube transcript source and OpenAI models into an orchestrator.
///
/// `config init` has to work on a broken file, so settings are validated here
/// and not at startup.
fn orchestrator(settings: &Settings, api_key: Option<&str>) -> Result<Orchestrator> {
    if let Err(e) = settings.validate() {
        Output::error(&format!("Invalid configuration: {}", e));
        return Err(e.into());
    }

    let credentials = match preflight::credentials(api_key) {
        Ok(credentials) => credentials,
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    let provider = OpenAIProvider::new(credentials, settings.openai.client_options());
    Ok(Orchestrator::new(
        settings,
        Arc::new(YoutubeTranscriptSource::new()),
        Arc::new(provider),
    )?)
}

/// Build the index for `video` behind a spinner.
async fn build_index(
    orchestrator: &Orchestrator,
    session: &mut Session,
    cache: &mut IndexCache,
    video: &str,
    params: &BuildParams,
) -> Result<BuildOutcome> {
    let spinner = Output::spinner("Fetching transcript and building index...");
    let result = orchestrator.build(session, cache, video, params).await;
    spinner.finish_and_clear();

    match result {
        Ok(outcome) => {
            let meta = &outcome.metadata;
            Output::success(&format!(
                "Indexed {} ({} chunks from {} characters{})",
                meta.video_id,
                meta.num_chunks,
                meta.transcript_chars,
                if outcome.cached { ", cached" } else { "" }
            ));
            Ok(outcome)
        }
        Err(e) => {
            Output::error(&format!("Failed to build index: {}", e));
            Err(e.into())
        }
    }
}
