use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::scribe::Scribe;

pub const DOWNLOAD_TOOL: &str = "download_youtube_url";

/// Entry in a `tools/list` response
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Arguments accepted by `download_youtube_url`
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadArgs {
    pub url: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

/// Result of a `tools/call` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text: text.into(),
            }],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::text(text)
        }
    }
}

pub fn list_tools() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: DOWNLOAD_TOOL,
        description: "Download YouTube video transcript and metadata",
        input_schema: json!({
            "type": "object",
            "properties": {
                "url": { "type": "string" },
                "language": { "type": "string" }
            },
            "required": ["url"],
            "additionalProperties": false,
            "$schema": "http://json-schema.org/draft-07/schema#"
        }),
    }]
}

/// Run a tool. Failures are reported in the result payload, never as a protocol error.
pub async fn call_tool(scribe: &Scribe, name: &str, arguments: Option<Value>) -> CallToolResult {
    match name {
        DOWNLOAD_TOOL => {
            let args: DownloadArgs =
                match serde_json::from_value(arguments.unwrap_or(Value::Null)) {
                    Ok(args) => args,
                    Err(e) => {
                        return CallToolResult::error(format!(
                            "Error: Invalid arguments for {}: {}",
                            DOWNLOAD_TOOL, e
                        ))
                    }
                };

            tracing::info!("Tool call {} for: {}", DOWNLOAD_TOOL, args.url);

            match scribe.fetch(&args.url, args.language, None).await {
                Ok(video) => match serde_json::to_string(&video) {
                    Ok(text) => CallToolResult::text(text),
                    Err(e) => CallToolResult::error(format!("Error: {}", e)),
                },
                Err(e) => {
                    tracing::warn!("Tool call {} failed: {}", DOWNLOAD_TOOL, e);
                    CallToolResult::error(format!("YouTube API Error: {}", e))
                }
            }
        }
        other => CallToolResult::error(format!("Error: Unknown tool: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::{arg_value, MockProcessRunner};
    use crate::VideoTranscript;
    use std::sync::Arc;

    const SAMPLE_VTT: &str = "WEBVTT\n\n00:00:00.000 --> 00:00:01.000\nHello world!\n\n00:00:01.500 --> 00:00:03.000\nThis is a test.\n";

    fn scribe_with_captions() -> Scribe {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|args| args.iter().any(|a| a == "--print"))
            .returning(|_| Ok("Sample Title\nSample description line 1\nSample description line 2".to_string()));
        runner
            .expect_run()
            .withf(|args| args.iter().any(|a| a == "--write-sub"))
            .returning(|args| {
                let language = arg_value(args, "--sub-lang").unwrap_or("en").to_string();
                let path = arg_value(args, "--output")
                    .unwrap()
                    .replace("%(id)s", "test-video")
                    .replace("%(ext)s", &format!("{}.vtt", language));
                fs_err::write(path, SAMPLE_VTT).unwrap();
                Ok(String::new())
            });
        Scribe::new(Arc::new(runner))
    }

    fn scribe_without_calls() -> Scribe {
        let mut runner = MockProcessRunner::new();
        runner.expect_run().times(0);
        Scribe::new(Arc::new(runner))
    }

    #[test]
    fn test_list_tools() {
        let tools = list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "download_youtube_url");
        assert_eq!(tools[0].input_schema["required"], json!(["url"]));
        assert_eq!(tools[0].input_schema["properties"]["language"]["type"], "string");

        let value = serde_json::to_value(&tools[0]).unwrap();
        assert!(value.get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_call_download_tool() {
        let scribe = scribe_with_captions();
        let result = call_tool(
            &scribe,
            DOWNLOAD_TOOL,
            Some(json!({ "url": "https://www.youtube.com/watch?v=x99-eKSyUqU", "language": "ja" })),
        )
        .await;

        assert!(!result.is_error);
        let video: VideoTranscript = serde_json::from_str(&result.content[0].text).unwrap();
        assert_eq!(video.title, "Sample Title");
        assert_eq!(
            video.description,
            "Sample description line 1\nSample description line 2"
        );
        assert_eq!(video.transcript, "Hello world!\nThis is a test.");
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let result = call_tool(&scribe_without_calls(), DOWNLOAD_TOOL, Some(json!({ "language": "en" }))).await;

        assert!(result.is_error);
        assert!(result.content[0]
            .text
            .starts_with("Error: Invalid arguments for download_youtube_url: "));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = call_tool(&scribe_without_calls(), "summarize", None).await;

        assert_eq!(result, CallToolResult::error("Error: Unknown tool: summarize"));
    }

    #[tokio::test]
    async fn test_pipeline_error_is_tagged() {
        let mut runner = MockProcessRunner::new();
        runner
            .expect_run()
            .withf(|args| args.iter().any(|a| a == "--print"))
            .returning(|_| Ok("Title\n".to_string()));
        runner
            .expect_run()
            .withf(|args| args.iter().any(|a| a == "--write-sub"))
            .returning(|_| Ok(String::new()));
        let scribe = Scribe::new(Arc::new(runner));

        let result = call_tool(&scribe, DOWNLOAD_TOOL, Some(json!({ "url": "https://youtu.be/abc" }))).await;

        assert!(result.is_error);
        assert_eq!(
            result.content[0].text,
            "YouTube API Error: No transcript found for this video"
        );
    }

    #[test]
    fn test_is_error_omitted_on_success() {
        let value = serde_json::to_value(CallToolResult::text("ok")).unwrap();
        assert!(value.get("isError").is_none());

        let value = serde_json::to_value(CallToolResult::error("bad")).unwrap();
        assert_eq!(value["isError"], json!(true));
    }
}
