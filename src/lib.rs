//! yt-scribe - fetch the spoken-word captions and basic metadata of a video as plain text
//!
//! The library drives `yt-dlp` to write a caption track into a scratch directory, recovers
//! from its path-length failures, and flattens the WebVTT/SRT cues into deduplicated text.
//! The same pipeline backs the `ytscribe` CLI and its MCP tool server.

pub mod cli;
pub mod config;
pub mod extractor;
pub mod output;
pub mod scribe;
pub mod server;
pub mod transcript;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractor::metadata::{MetadataFetcher, VideoMetadata};
pub use extractor::{ProcessError, ProcessRunner, YtDlpRunner};
pub use scribe::Scribe;
pub use transcript::cleaner::clean_transcript;
pub use transcript::{TranscriptPipeline, TranscriptRequest};

/// Result type used by the CLI and server glue
pub type Result<T> = anyhow::Result<T>;

/// Error types surfaced by the metadata fetcher and transcript pipeline
#[derive(thiserror::Error, Debug)]
pub enum ScribeError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to get video metadata: {0}")]
    Metadata(String),

    #[error("Failed to create scratch directory: {0}")]
    ScratchDir(String),

    #[error("No transcript found for this video")]
    NoCaptions,

    #[error("Transcript is empty after removing cue markup")]
    EmptyTranscript,

    #[error("Failed to get transcript even with fallback filename: {0}")]
    Fallback(String),

    #[error("Failed to get transcript: {0}")]
    Process(String),
}

/// Title, description and cleaned transcript of one video
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VideoTranscript {
    pub title: String,
    pub description: String,
    pub transcript: String,
}
