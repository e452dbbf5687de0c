use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::VideoTranscript;

pub mod formatters;

pub use formatters::*;

fn render(video: &VideoTranscript, format: &OutputFormat, transcript_only: bool) -> Result<String> {
    Ok(match format {
        OutputFormat::Text if transcript_only => video.transcript.clone(),
        OutputFormat::Text => format_as_text(video),
        OutputFormat::Json if transcript_only => format_transcript_as_json(&video.transcript)?,
        OutputFormat::Json => format_as_json(video)?,
    })
}

/// Save a fetched video to file
pub async fn save_to_file(
    video: &VideoTranscript,
    path: &Path,
    format: &OutputFormat,
    transcript_only: bool,
) -> Result<()> {
    let content = render(video, format, transcript_only)?;

    fs_err::write(path, content)?;
    Ok(())
}

/// Print a fetched video to console
pub fn print_to_console(
    video: &VideoTranscript,
    format: &OutputFormat,
    transcript_only: bool,
) -> Result<()> {
    let content = render(video, format, transcript_only)?;

    println!("{}", content);
    Ok(())
}
