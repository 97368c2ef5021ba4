//! Interactive chat command.

use super::{build_index, orchestrator};
use crate::cli::{BuildArgs, Output, QueryArgs};
use crate::config::Settings;
use crate::indexer::{BuildParams, IndexCache};
use crate::orchestrator::Orchestrator;
use crate::session::Session;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(
    video: &str,
    build: &BuildArgs,
    query: &QueryArgs,
    api_key: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let build = build.resolve(&settings)?;
    let query = query.resolve(&settings)?;
    let orchestrator = orchestrator(&settings, api_key)?;

    let mut session = Session::new();
    let mut cache = IndexCache::new();
    build_index(&orchestrator, &mut session, &mut cache, video, &build).await?;

    println!("\n{}", style("Vidask Chat").bold().cyan());
    println!(
        "{}\n",
        style("Ask about the video. 'history' shows the conversation, 'clear' starts over, 'exit' quits.")
            .dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("history") {
            if session.history().is_empty() {
                Output::info("No questions asked yet.");
            }
            for turn in session.history() {
                Output::turn(turn);
            }
            continue;
        }

        if input.eq_ignore_ascii_case("clear") {
            if let Err(e) = start_over(&orchestrator, &mut session, &mut cache, video, &build).await
            {
                Output::error("No index is loaded. Restart the chat to continue.");
                return Err(e);
            }
            continue;
        }

        let spinner = Output::spinner("Thinking...");
        let result = orchestrator.ask(&mut session, input, &query).await;
        spinner.finish_and_clear();

        // Failures are shown as the answer for this turn; the session stays usable.
        match result {
            Ok(response) => Output::answer(&response.answer),
            Err(e) => Output::answer(&format!("Error: {}", e)),
        }
    }

    Ok(())
}

/// Forget the conversation and load the same index again.
async fn start_over(
    orchestrator: &Orchestrator,
    session: &mut Session,
    cache: &mut IndexCache,
    video: &str,
    build: &BuildParams,
) -> Result<()> {
    session.clear();
    Output::info("Conversation cleared.");
    // Same parameters, so this normally comes straight from the cache.
    build_index(orchestrator, session, cache, video, build).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ChunkingConfig;
    use crate::config::{EmbeddingModel, Prompts};
    use crate::error::VidaskError;
    use crate::testing::{StubProvider, StubTranscriptSource};
    use std::sync::Arc;

    const VIDEO: &str = "dQw4w9WgXcQ";

    fn params() -> BuildParams {
        BuildParams {
            languages: vec!["en".to_string()],
            chunking: ChunkingConfig::new(1000, 200).unwrap(),
            embedding_model: EmbeddingModel::TextEmbedding3Small,
        }
    }

    fn orchestrator(transcripts: Arc<StubTranscriptSource>) -> Orchestrator {
        Orchestrator::with_prompts(
            Prompts::default(),
            transcripts,
            Arc::new(StubProvider::offline()),
        )
    }

    #[tokio::test]
    async fn test_start_over_reuses_cached_index() {
        let transcripts = Arc::new(StubTranscriptSource::with_text(
            "Never gonna give you up. Never gonna let you down.",
        ));
        let orch = orchestrator(transcripts.clone());
        let mut session = Session::new();
        let mut cache = IndexCache::new();
        build_index(&orch, &mut session, &mut cache, VIDEO, &params())
            .await
            .unwrap();
        session.record_exchange("Who sings?", Ok("Rick."));

        start_over(&orch, &mut session, &mut cache, VIDEO, &params())
            .await
            .unwrap();

        assert!(session.has_index());
        assert!(session.history().is_empty());
        assert_eq!(transcripts.calls(), 1);
    }

    #[tokio::test]
    async fn test_start_over_reports_failed_reload() {
        let orch = orchestrator(Arc::new(StubTranscriptSource::service_down("offline")));
        let mut session = Session::new();
        let mut cache = IndexCache::new();

        let err = start_over(&orch, &mut session, &mut cache, VIDEO, &params())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<VidaskError>(),
            Some(VidaskError::TranscriptService(_))
        ));
        assert!(!session.has_index());
    }
}
