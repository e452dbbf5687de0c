use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytscribe",
    about = "yt-scribe - Fetch YouTube captions and metadata as clean plain text",
    version,
    long_about = "Downloads a video's caption track with yt-dlp, strips cue timings, markup and rolling-caption repeats, and prints the spoken text with the video's title and description. Can also run as an MCP tool server on stdio."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch title, description and transcript of a video
    Fetch {
        /// Video URL
        #[arg(value_name = "URL")]
        url: String,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format (config default if not specified)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Caption language code, e.g. en or ja (config default if not specified)
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,

        /// Write caption files into this directory and keep them
        #[arg(long, value_name = "DIR")]
        scratch_dir: Option<PathBuf>,

        /// Skip the metadata lookup and print only the transcript
        #[arg(long)]
        transcript_only: bool,
    },

    /// Print the title and description of a video
    Metadata {
        /// Video URL
        #[arg(value_name = "URL")]
        url: String,
    },

    /// Run as an MCP tool server on stdin/stdout
    Serve,

    /// Print the MCP tool definitions as JSON
    Tools,

    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text
    Text,
    /// JSON object with title, description and transcript
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl OutputFormat {
    /// Parse a config value, falling back to text for anything unrecognised
    pub fn from_config(value: &str) -> Self {
        <Self as ValueEnum>::from_str(value, true).unwrap_or(OutputFormat::Text)
    }
}
