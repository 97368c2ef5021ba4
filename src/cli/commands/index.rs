//! Index command implementation.

use super::{build_index, orchestrator};
use crate::cli::BuildArgs;
use crate::config::Settings;
use crate::indexer::IndexCache;
use crate::session::Session;
use anyhow::Result;

/// Run the index command.
pub async fn run_index(
    video: &str,
    build: &BuildArgs,
    api_key: Option<&str>,
    settings: Settings,
) -> Result<()> {
    let params = build.resolve(&settings)?;
    let orchestrator = orchestrator(&settings, api_key)?;

    let mut session = Session::new();
    let mut cache = IndexCache::new();
    let outcome = build_index(&orchestrator, &mut session, &mut cache, video, &params).await?;

    println!("{}", serde_json::to_string_pretty(&outcome.metadata)?);
    Ok(())
}
