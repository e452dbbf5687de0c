use anyhow::{Context, Result};
use serde_json::json;

use crate::VideoTranscript;

/// Title, description and transcript separated by blank lines
pub fn format_as_text(video: &VideoTranscript) -> String {
    let mut output = String::new();

    output.push_str(&video.title);
    output.push_str("\n\n");

    if !video.description.is_empty() {
        output.push_str(&video.description);
        output.push_str("\n\n");
    }

    output.push_str(&video.transcript);
    output
}

/// The same `{title, description, transcript}` object the MCP tool returns, pretty-printed
pub fn format_as_json(video: &VideoTranscript) -> Result<String> {
    serde_json::to_string_pretty(video).context("Failed to serialize transcript")
}

/// `{"transcript": ...}` with title and description left out
pub fn format_transcript_as_json(transcript: &str) -> Result<String> {
    serde_json::to_string_pretty(&json!({ "transcript": transcript }))
        .context("Failed to serialize transcript")
}
