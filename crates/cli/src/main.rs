mod echo;
mod writer;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fictex_core::{Chapter, Document, FetchConfig, PostProcessConfig, fetch_file, fetch_stdin};
use owo_colors::OwoColorize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert FanFiction.net chapter pages into LaTeX chapter files
#[derive(Parser, Debug)]
#[command(name = "fictex")]
#[command(version = VERSION)]
#[command(about = "Convert FanFiction.net chapter pages into LaTeX", long_about = None)]
struct Args {
    /// URLs to fetch, local HTML files, or "-" for stdin
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<String>,

    /// Output directory for the generated .tex files (created if missing)
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// Enable cleanup of spacing and punctuation in the output text
    #[arg(short, long)]
    cleanup: bool,

    /// Print chapter metadata as JSON instead of writing files
    #[arg(long)]
    dump_metadata: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable progress output
    #[arg(short, long)]
    verbose: bool,
}

/// Load one input: stdin, URL, or local file.
async fn load_input(input: &str, fetch_config: &FetchConfig) -> anyhow::Result<String> {
    if input == "-" {
        fetch_stdin().context("Failed to read from stdin")
    } else if input.starts_with("http://") || input.starts_with("https://") {
        fictex_core::fetch_story_page(input, fetch_config)
            .await
            .with_context(|| format!("Failed to fetch URL: {}", input))
    } else {
        fetch_file(input).with_context(|| format!("Failed to read file: {}", input))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        echo::print_banner();
    }

    fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output directory: {}", args.output.display()))?;

    let mut fetch_config = FetchConfig { timeout: args.timeout, ..Default::default() };
    if let Some(user_agent) = args.user_agent {
        fetch_config.user_agent = user_agent;
    }

    let postprocess_config = PostProcessConfig { cleanup: args.cleanup };

    // Pages are processed strictly one at a time; the first page-level
    // failure aborts the whole run.
    let total = args.inputs.len();
    for (index, input) in args.inputs.iter().enumerate() {
        if args.verbose {
            echo::print_step(index + 1, total, &format!("Processing {}", input.bright_white()));
        }

        let html = load_input(input, &fetch_config).await?;

        let doc = Document::parse(&html).with_context(|| format!("Failed to parse HTML from {}", input))?;
        let chapter = Chapter::from_document(&doc, &postprocess_config)
            .with_context(|| format!("Failed to convert {}", input))?;

        if args.verbose {
            echo::print_info(&format!(
                "Found chapter {} ('{}') of story {} ('{}')",
                chapter.metadata.chapter_number,
                chapter.metadata.chapter_title,
                chapter.metadata.story_id,
                chapter.metadata.story_title,
            ));
        }

        if args.dump_metadata {
            let json = chapter.metadata_json().context("Failed to serialize metadata")?;
            println!("{}", serde_json::to_string_pretty(&json)?);
            continue;
        }

        let chapter_path = writer::write_chapter(&args.output, &chapter)?;
        let wrapper_paths = writer::write_story_wrapper(&args.output, &chapter.metadata)?;

        if args.verbose {
            echo::print_success(&format!("Wrote {}", chapter_path.display()));
            for path in wrapper_paths {
                echo::print_success(&format!("Wrote {}", path.display()));
            }
        }
    }

    Ok(())
}
