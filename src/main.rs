use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_scribe::cli::{Cli, Commands, OutputFormat};
use yt_scribe::config::Config;
use yt_scribe::server::{tools, McpServer};
use yt_scribe::transcript::TranscriptRequest;
use yt_scribe::{output, utils, Scribe, VideoTranscript};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "yt_scribe=debug,ytscribe=debug"
    } else if cli.quiet {
        "yt_scribe=warn,ytscribe=warn"
    } else {
        "yt_scribe=info,ytscribe=info"
    };

    // stdout carries command output and the MCP stream, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Commands::Tools = cli.command {
        println!("{}", serde_json::to_string_pretty(&tools::list_tools())?);
        return Ok(());
    }

    let config = Config::load().await?;

    if let Commands::Config { show } = cli.command {
        if show {
            config.display();
        } else {
            println!("Edit the config file to change settings:");
            println!("  {}", Config::config_path()?.display());
        }
        return Ok(());
    }

    // Check for required external dependencies (non-fatal)
    let missing_deps = utils::check_dependencies(&config.extractor.binary).await;
    if !missing_deps.is_empty() {
        eprintln!("⚠️  Dependency check warnings:");
        for dep in missing_deps {
            eprintln!("   • {}", dep);
        }
        eprintln!("   (Continuing anyway - tools may be available)");
    }

    let scribe = Scribe::from_config(&config);

    match cli.command {
        Commands::Fetch {
            url,
            output,
            format,
            language,
            scratch_dir,
            transcript_only,
        } => {
            let format = format
                .unwrap_or_else(|| OutputFormat::from_config(&config.app.default_output_format));
            let progress = spinner(cli.quiet, "Fetching captions with yt-dlp...")?;
            let started = Instant::now();

            let result = if transcript_only {
                let request = TranscriptRequest::new(url.as_str())
                    .with_language(language)
                    .with_scratch_dir(scratch_dir);
                scribe
                    .transcript(&request)
                    .await
                    .map(|transcript| VideoTranscript {
                        title: String::new(),
                        description: String::new(),
                        transcript,
                    })
            } else {
                scribe.fetch(&url, language, scratch_dir).await
            };

            let video = match result {
                Ok(video) => {
                    progress.finish_with_message(format!(
                        "Fetched in {}",
                        utils::format_duration(started.elapsed().as_secs_f64())
                    ));
                    video
                }
                Err(e) => {
                    progress.finish_with_message("Fetch failed");
                    return Err(e.into());
                }
            };

            match output {
                Some(path) => {
                    output::save_to_file(&video, &path, &format, transcript_only).await?;
                    println!("Transcript saved to: {}", path.display());
                }
                None => {
                    output::print_to_console(&video, &format, transcript_only)?;
                }
            }
        }
        Commands::Metadata { url } => {
            let metadata = scribe.metadata(&url).await?;
            println!("{}", metadata.title);
            if !metadata.description.is_empty() {
                println!();
                println!("{}", metadata.description);
            }
        }
        Commands::Serve => {
            McpServer::new(scribe).serve_stdio().await?;
        }
        Commands::Tools | Commands::Config { .. } => {}
    }

    Ok(())
}

fn spinner(quiet: bool, message: &'static str) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    progress.set_message(message);
    progress.enable_steady_tick(Duration::from_millis(120));
    Ok(progress)
}
