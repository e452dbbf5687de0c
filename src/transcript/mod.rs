use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::extractor::{subtitle_args, ProcessError, ProcessRunner, PRIMARY_OUTPUT_TEMPLATE};
use crate::utils::fallback_output_template;
use crate::ScribeError;

pub mod cleaner;
mod scratch;

use cleaner::clean_transcript;
use scratch::ScratchDir;

/// Caption language requested when neither the caller nor the config names one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Caption file extensions the extractor may leave behind
pub const CAPTION_EXTENSIONS: &[&str] = &["vtt", "srt"];

/// Error fragments that mean the output path was too long for the filesystem
const PATH_LENGTH_SIGNATURES: &[&str] = &[
    "File name too long",
    "Errno 36",
    "os error 36",
    "ENOENT",
    "No such file or directory",
];

const FALLBACK_NO_CAPTIONS: &str = "No transcript found for this video (fallback attempt)";

/// One transcript lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRequest {
    pub url: String,

    /// Subtitle track code such as `en` or `ja`
    pub language: Option<String>,

    /// Caller-owned directory; never deleted by the pipeline
    pub scratch_dir: Option<PathBuf>,
}

impl TranscriptRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            language: None,
            scratch_dir: None,
        }
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn with_scratch_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.scratch_dir = dir;
        self
    }
}

/// Failure of one extractor run plus caption discovery
#[derive(thiserror::Error, Debug)]
enum AttemptError {
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("No transcript found for this video")]
    NoCaptions,
}

impl AttemptError {
    fn is_path_length_failure(&self) -> bool {
        if matches!(self, Self::NoCaptions) {
            return false;
        }
        let message = self.to_string();
        PATH_LENGTH_SIGNATURES
            .iter()
            .any(|signature| message.contains(signature))
    }
}

/// Fetches a caption track through the extractor and flattens it to text
pub struct TranscriptPipeline {
    runner: Arc<dyn ProcessRunner>,
    default_language: String,
    scratch_root: Option<PathBuf>,
}

impl TranscriptPipeline {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            default_language: DEFAULT_LANGUAGE.to_string(),
            scratch_root: None,
        }
    }

    pub fn from_config(config: &Config, runner: Arc<dyn ProcessRunner>) -> Self {
        Self::new(runner)
            .with_default_language(&config.extractor.default_language)
            .with_scratch_root(config.app.temp_dir.clone())
    }

    pub fn with_default_language(mut self, language: &str) -> Self {
        self.default_language = language.to_string();
        self
    }

    /// Parent directory for private scratch directories
    pub fn with_scratch_root(mut self, root: Option<PathBuf>) -> Self {
        self.scratch_root = root;
        self
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Fetch and clean the caption track for `request.url`.
    ///
    /// Returns non-empty text or an error. A path-length failure on the first
    /// run triggers exactly one retry with a timestamp-based file name.
    pub async fn fetch_transcript(&self, request: &TranscriptRequest) -> Result<String, ScribeError> {
        if request.url.trim().is_empty() {
            return Err(ScribeError::InvalidRequest("url must not be empty".to_string()));
        }

        let language = request
            .language
            .as_deref()
            .unwrap_or(&self.default_language);

        // Dropping the guard removes a private directory on every return below
        let scratch = ScratchDir::acquire(request.scratch_dir.as_deref(), self.scratch_root.as_deref())?;

        tracing::info!("Fetching {} captions for: {}", language, request.url);

        let primary_template = scratch.path().join(PRIMARY_OUTPUT_TEMPLATE);
        let content = match self
            .attempt(&request.url, language, scratch.path(), &primary_template)
            .await
        {
            Ok(content) => content,
            Err(AttemptError::NoCaptions) => return Err(ScribeError::NoCaptions),
            Err(err) if err.is_path_length_failure() => {
                tracing::warn!(
                    "Filename too long error detected, retrying with timestamp-based filename: {}",
                    err
                );

                let fallback_template = scratch.path().join(fallback_output_template());
                self.attempt(&request.url, language, scratch.path(), &fallback_template)
                    .await
                    .map_err(|err| match err {
                        AttemptError::NoCaptions => {
                            ScribeError::Fallback(FALLBACK_NO_CAPTIONS.to_string())
                        }
                        other => ScribeError::Fallback(other.to_string()),
                    })?
            }
            Err(err) => return Err(ScribeError::Process(err.to_string())),
        };

        let transcript = clean_transcript(&content);
        if transcript.is_empty() {
            return Err(ScribeError::EmptyTranscript);
        }

        tracing::info!("Transcript ready ({} characters)", transcript.len());
        Ok(transcript)
    }

    /// Run the extractor once and read the first caption file it produced
    async fn attempt(
        &self,
        url: &str,
        language: &str,
        scratch: &Path,
        output_template: &Path,
    ) -> Result<String, AttemptError> {
        let args = subtitle_args(url, language, output_template);
        self.runner.run(&args).await?;

        let caption_path = find_caption_file(scratch)?.ok_or(AttemptError::NoCaptions)?;
        tracing::debug!("Reading caption file: {}", caption_path.display());

        Ok(fs_err::read_to_string(&caption_path)?)
    }
}

/// First caption file in directory-listing order
pub fn find_caption_file(dir: &Path) -> std::io::Result<Option<PathBuf>> {
    for entry in fs_err::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_caption_file(&path) {
            return Ok(Some(path));
        }
    }
    Ok(None)
}

pub fn is_caption_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CAPTION_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}
