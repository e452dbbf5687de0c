use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

pub mod metadata;

/// Output template used on the first attempt: the platform's video id is short and unique
pub const PRIMARY_OUTPUT_TEMPLATE: &str = "%(id)s.%(ext)s";

/// Print format for metadata mode: title on the first line, description after it
pub const METADATA_PRINT_FORMAT: &str = "%(title)s\n%(description)s";

/// Failure of a single extractor invocation
#[derive(thiserror::Error, Debug)]
pub enum ProcessError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Narrow boundary around the external extractor process.
///
/// Implementations receive the full argument list and return captured stdout
/// when the process exits successfully.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, args: &[String]) -> std::result::Result<String, ProcessError>;
}

/// Runs `yt-dlp` (or a compatible binary) as a child process
pub struct YtDlpRunner {
    yt_dlp_path: String,
}

impl YtDlpRunner {
    pub fn new() -> Self {
        Self::with_binary("yt-dlp")
    }

    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            yt_dlp_path: path.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.yt_dlp_path
    }
}

impl Default for YtDlpRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for YtDlpRunner {
    async fn run(&self, args: &[String]) -> std::result::Result<String, ProcessError> {
        tracing::debug!("Running {} {:?}", self.yt_dlp_path, args);

        let output = Command::new(&self.yt_dlp_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| ProcessError::Launch {
                program: self.yt_dlp_path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProcessError::Exit {
                program: self.yt_dlp_path.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Arguments for metadata-only mode
pub fn metadata_args(url: &str) -> Vec<String> {
    vec![
        "--skip-download".to_string(),
        "--print".to_string(),
        METADATA_PRINT_FORMAT.to_string(),
        url.to_string(),
    ]
}

/// Arguments asking for manual and auto-generated captions in one language, as WebVTT
pub fn subtitle_args(url: &str, language: &str, output_template: &Path) -> Vec<String> {
    vec![
        "--write-sub".to_string(),
        "--write-auto-sub".to_string(),
        "--sub-lang".to_string(),
        language.to_string(),
        "--skip-download".to_string(),
        "--sub-format".to_string(),
        "vtt".to_string(),
        "--output".to_string(),
        output_template.to_string_lossy().into_owned(),
        "--verbose".to_string(),
        url.to_string(),
    ]
}

/// Value that follows `flag` in an argument list
#[cfg(test)]
pub(crate) fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}
