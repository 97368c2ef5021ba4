//! YouTube transcript source backed by the public caption endpoints.

use super::{TranscriptSegment, TranscriptSource};
use crate::error::{Result, VidaskError};
use crate::source::VideoReference;
use async_trait::async_trait;
use tracing::{debug, instrument, warn};
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};
use yt_transcript_rs::YouTubeTranscriptApi;

/// Fetches captions (manual or auto-generated) from YouTube.
#[derive(Debug, Default, Clone)]
pub struct YoutubeTranscriptSource;

impl YoutubeTranscriptSource {
    pub fn new() -> Self {
        Self
    }
}

/// Whether YouTube answered that this video has no usable transcript.
fn is_missing_transcript(reason: Option<&CouldNotRetrieveTranscriptReason>) -> bool {
    matches!(
        reason,
        Some(
            CouldNotRetrieveTranscriptReason::TranscriptsDisabled { .. }
                | CouldNotRetrieveTranscriptReason::NoTranscriptFound { .. }
                | CouldNotRetrieveTranscriptReason::VideoUnavailable { .. }
        )
    )
}

/// Missing transcripts are `TranscriptUnavailable`; anything else is a service failure.
fn classify(video_id: &VideoReference, err: &CouldNotRetrieveTranscript) -> VidaskError {
    if is_missing_transcript(err.reason.as_ref()) {
        VidaskError::TranscriptUnavailable {
            video_id: video_id.to_string(),
            reason: err.to_string(),
        }
    } else {
        VidaskError::TranscriptService(err.to_string())
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self), fields(video_id = %video_id))]
    async fn fetch(
        &self,
        video_id: &VideoReference,
        languages: &[String],
    ) -> Result<Vec<TranscriptSegment>> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            VidaskError::TranscriptService(format!("transcript client setup failed: {}", e))
        })?;

        let language_refs: Vec<&str> = languages.iter().map(String::as_str).collect();
        debug!("Requesting transcript in {:?}", language_refs);

        let fetched = api
            .fetch_transcript(video_id.as_str(), &language_refs, false)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch YouTube transcript");
                classify(video_id, &e)
            })?;

        let segments: Vec<TranscriptSegment> = fetched
            .parts()
            .iter()
            .map(|p| TranscriptSegment::new(p.text.clone(), p.start, p.duration))
            .collect();

        if segments.is_empty() {
            return Err(VidaskError::TranscriptUnavailable {
                video_id: video_id.to_string(),
                reason: "transcript is empty".to_string(),
            });
        }

        debug!("Fetched {} transcript segments", segments.len());
        Ok(segments)
    }
}
