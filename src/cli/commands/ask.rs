//! Ask command implementation.

use super::{build_index, orchestrator};
use crate::cli::{BuildArgs, Output, QueryArgs};
use crate::config::Settings;
use crate::indexer::IndexCache;
use crate::session::Session;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    video: &str,
    question: &str,
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

    let spinner = Output::spinner("Searching transcript...");
    let result = orchestrator.ask(&mut session, question, &query).await;
    spinner.finish_and_clear();

    match result {
        Ok(response) => {
            println!("\n{}\n", response.answer);

            if !response.sources.is_empty() {
                Output::header("Sources");
                for source in &response.sources {
                    Output::source(source);
                }
            }
            Ok(())
        }
        Err(e) => {
            Output::error(&format!("Failed to generate answer: {}", e));
            Err(e.into())
        }
    }
}
