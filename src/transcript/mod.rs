//! Transcript fetching.
//!
//! A [`TranscriptSource`] returns the timed caption segments of a video; the
//! pipeline only ever needs their concatenated text, but segment timing is kept
//! so retrieved chunks can link back into the video.

mod youtube;

pub use youtube::YoutubeTranscriptSource;

use crate::error::Result;
use crate::source::VideoReference;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Language used when the caller does not ask for any.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A single timed caption segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Duration in seconds.
    pub duration_seconds: f64,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(text: impl Into<String>, start_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            text: text.into(),
            start_seconds,
            duration_seconds,
        }
    }
}

/// A full transcript for one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video this transcript belongs to.
    pub video_id: VideoReference,
    /// Languages that were requested, in priority order.
    pub languages: Vec<String>,
    /// Segments in playback order.
    pub segments: Vec<TranscriptSegment>,
    /// Segment texts joined with single spaces.
    pub full_text: String,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(
        video_id: VideoReference,
        languages: Vec<String>,
        segments: Vec<TranscriptSegment>,
    ) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            video_id,
            languages,
            segments,
            full_text,
        }
    }

    /// Length of the full text in characters.
    pub fn char_count(&self) -> usize {
        self.full_text.chars().count()
    }

    /// Start time of the segment containing the given character offset of `full_text`.
    pub fn start_seconds_at(&self, char_offset: usize) -> f64 {
        let mut segment_start = 0;
        for segment in &self.segments {
            let segment_end = segment_start + segment.text.chars().count();
            if char_offset <= segment_end {
                return segment.start_seconds;
            }
            // +1 for the joining space
            segment_start = segment_end + 1;
        }
        self.segments.last().map(|s| s.start_seconds).unwrap_or(0.0)
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript segments of a video, trying `languages` in order.
    async fn fetch(
        &self,
        video_id: &VideoReference,
        languages: &[String],
    ) -> Result<Vec<TranscriptSegment>>;
}

/// Parse a comma-separated language list, falling back to [`DEFAULT_LANGUAGE`].
pub fn parse_languages(input: &str) -> Vec<String> {
    normalize_languages(input.split(',').map(str::to_string).collect())
}

/// Trim entries, drop blanks, and fall back to [`DEFAULT_LANGUAGE`] when nothing is left.
pub fn normalize_languages(languages: Vec<String>) -> Vec<String> {
    let languages: Vec<String> = languages
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if languages.is_empty() {
        vec![DEFAULT_LANGUAGE.to_string()]
    } else {
        languages
    }
}

/// Fetch a video's transcript and assemble its full text.
///
/// Errors from the source are returned as-is; a missing transcript is not a
/// transient condition, so there is no retry.
#[instrument(skip(source, languages), fields(video_id = %video_id))]
pub async fn fetch_transcript(
    source: &dyn TranscriptSource,
    video_id: &VideoReference,
    languages: &[String],
) -> Result<Transcript> {
    let languages = normalize_languages(languages.to_vec());

    let segments = source.fetch(video_id, &languages).await?;
    let transcript = Transcript::new(video_id.clone(), languages, segments);

    info!(
        "Fetched transcript: {} segments, {} chars",
        transcript.segments.len(),
        transcript.char_count()
    );
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VidaskError;
    use crate::testing::StubTranscriptSource;

    fn video() -> VideoReference {
        "dQw4w9WgXcQ".parse().unwrap()
    }

    #[test]
    fn test_transcript_creation() {
        let segments = vec![
            TranscriptSegment::new("Hello world", 0.0, 5.0),
            TranscriptSegment::new("This is a test", 5.0, 5.0),
        ];

        let transcript = Transcript::new(video(), vec!["en".to_string()], segments);

        assert_eq!(transcript.full_text, "Hello world This is a test");
        assert_eq!(transcript.char_count(), 26);
    }

    #[test]
    fn test_start_seconds_at() {
        let segments = vec![
            TranscriptSegment::new("First", 0.0, 5.0),
            TranscriptSegment::new("Second", 5.0, 5.0),
            TranscriptSegment::new("Third", 10.0, 5.0),
        ];
        let transcript = Transcript::new(video(), vec![], segments);

        // "First Second Third"
        assert_eq!(transcript.start_seconds_at(0), 0.0);
        assert_eq!(transcript.start_seconds_at(6), 5.0);
        assert_eq!(transcript.start_seconds_at(13), 10.0);
        assert_eq!(transcript.start_seconds_at(500), 10.0);
    }

    #[test]
    fn test_parse_languages() {
        assert_eq!(parse_languages("en, hi ,bn"), vec!["en", "hi", "bn"]);
        assert_eq!(parse_languages(""), vec!["en"]);
        assert_eq!(parse_languages(" , "), vec!["en"]);
    }

    #[tokio::test]
    async fn test_fetch_transcript_joins_segments() {
        let source = StubTranscriptSource::with_segments(vec![
            TranscriptSegment::new("never gonna", 0.0, 1.5),
            TranscriptSegment::new("give you up", 1.5, 1.5),
        ]);

        let transcript = fetch_transcript(&source, &video(), &[]).await.unwrap();
        assert_eq!(transcript.full_text, "never gonna give you up");
        assert_eq!(transcript.languages, vec!["en"]);
        assert_eq!(source.requested_languages(), vec![vec!["en".to_string()]]);
    }

    #[tokio::test]
    async fn test_fetch_transcript_propagates_unavailable() {
        let source = StubTranscriptSource::unavailable("Transcripts are disabled for this video");

        let err = fetch_transcript(&source, &video(), &["de".to_string()])
            .await
            .unwrap_err();

        match err {
            VidaskError::TranscriptUnavailable { video_id, reason } => {
                assert_eq!(video_id, "dQw4w9WgXcQ");
                assert_eq!(reason, "Transcripts are disabled for this video");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(source.calls(), 1);
    }
}
