use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Timestamps,
    Json,
}

#[derive(Parser)]
#[command(name = "ytq", about = "YouTube transcript extractor with transcript-grounded chat", version)]
pub struct Cli {
    /// YouTube video URL (reads from stdin if omitted)
    pub url: Option<String>,

    /// Ask questions about the transcript interactively after extraction
    #[arg(short, long)]
    pub chat: bool,

    /// Output format: text (default), timestamps, json
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write transcript output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Generative model for chat answers
    #[arg(long)]
    pub model: Option<String>,

    /// Show video metadata and session details
    #[arg(short, long)]
    pub verbose: bool,
}
