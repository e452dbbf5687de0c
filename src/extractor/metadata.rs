use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{metadata_args, ProcessRunner};
use crate::ScribeError;

/// Title and description of a video
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,

    /// May span several lines; empty when the video has none
    pub description: String,
}

/// Reads title and description without downloading any media
pub struct MetadataFetcher {
    runner: Arc<dyn ProcessRunner>,
}

impl MetadataFetcher {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    pub async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata, ScribeError> {
        tracing::debug!("Fetching metadata for: {}", url);

        let stdout = self
            .runner
            .run(&metadata_args(url))
            .await
            .map_err(|e| ScribeError::Metadata(e.to_string()))?;

        Ok(parse_metadata(&stdout))
    }
}

/// Everything before the first newline is the title, the rest is the description
pub fn parse_metadata(output: &str) -> VideoMetadata {
    let (title, description) = output.split_once('\n').unwrap_or((output, ""));

    VideoMetadata {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{MockProcessRunner, ProcessError};

    #[test]
    fn test_parse_metadata() {
        let metadata =
            parse_metadata("Sample Title\nSample description line 1\nSample description line 2");
        assert_eq!(metadata.title, "Sample Title");
        assert_eq!(
            metadata.description,
            "Sample description line 1\nSample description line 2"
        );
    }

    #[test]
    fn test_parse_metadata_trims_fields() {
        let metadata = parse_metadata("  Padded Title \r\n\n  body text  \n\n");
        assert_eq!(metadata.title, "Padded Title");
        assert_eq!(metadata.description, "body text");
    }

    #[test]
    fn test_parse_metadata_without_description() {
        assert_eq!(
            parse_metadata("Only a title\n"),
            VideoMetadata {
                title: "Only a title".to_string(),
                description: String::new(),
            }
        );
        assert_eq!(parse_metadata("No newline at all").description, "");
    }

    #[tokio::test]
    async fn test_fetch_metadata_uses_print_mode() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|args| args.iter().any(|a| a == "--print") && args.iter().any(|a| a == "--skip-download"))
            .times(1)
            .returning(|_| Ok("Title\nDescription".to_string()));

        let fetcher = MetadataFetcher::new(Arc::new(runner));
        let metadata = fetcher.fetch_metadata("https://youtu.be/abc").await.unwrap();

        assert_eq!(metadata.title, "Title");
        assert_eq!(metadata.description, "Description");
    }

    #[tokio::test]
    async fn test_fetch_metadata_wraps_process_failure() {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(1).returning(|_| {
            Err(ProcessError::Exit {
                program: "yt-dlp".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "ERROR: Video unavailable".to_string(),
            })
        });

        let fetcher = MetadataFetcher::new(Arc::new(runner));
        let err = fetcher.fetch_metadata("https://youtu.be/gone").await.unwrap_err();

        assert!(matches!(err, ScribeError::Metadata(_)));
        let message = err.to_string();
        assert!(message.starts_with("Failed to get video metadata: "));
        assert!(message.contains("Video unavailable"));
    }
}
