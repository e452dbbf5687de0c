use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::extractor::metadata::{MetadataFetcher, VideoMetadata};
use crate::extractor::{ProcessRunner, YtDlpRunner};
use crate::transcript::{TranscriptPipeline, TranscriptRequest};
use crate::{ScribeError, VideoTranscript};

/// Metadata fetcher and transcript pipeline sharing one extractor
pub struct Scribe {
    pipeline: TranscriptPipeline,
    metadata: MetadataFetcher,
}

impl Scribe {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            pipeline: TranscriptPipeline::new(runner.clone()),
            metadata: MetadataFetcher::new(runner),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let runner: Arc<dyn ProcessRunner> =
            Arc::new(YtDlpRunner::with_binary(config.extractor.binary.clone()));

        Self {
            pipeline: TranscriptPipeline::from_config(config, runner.clone()),
            metadata: MetadataFetcher::new(runner),
        }
    }

    pub fn pipeline(&self) -> &TranscriptPipeline {
        &self.pipeline
    }

    pub async fn metadata(&self, url: &str) -> Result<VideoMetadata, ScribeError> {
        self.metadata.fetch_metadata(url).await
    }

    pub async fn transcript(&self, request: &TranscriptRequest) -> Result<String, ScribeError> {
        self.pipeline.fetch_transcript(request).await
    }

    /// Fetch transcript and metadata concurrently; either failure fails the whole call.
    ///
    /// Both sides always run to completion so the transcript's scratch directory
    /// is removed before this returns.
    pub async fn fetch(
        &self,
        url: &str,
        language: Option<String>,
        scratch_dir: Option<PathBuf>,
    ) -> Result<VideoTranscript, ScribeError> {
        let request = TranscriptRequest::new(url)
            .with_language(language)
            .with_scratch_dir(scratch_dir);

        let (transcript, metadata) = tokio::join!(
            self.pipeline.fetch_transcript(&request),
            self.metadata.fetch_metadata(url),
        );
        let transcript = transcript?;
        let metadata = metadata?;

        Ok(VideoTranscript {
            title: metadata.title,
            description: metadata.description,
            transcript,
        })
    }
}
