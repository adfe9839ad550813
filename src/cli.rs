use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vidsplit")]
#[command(
    author,
    version,
    about = "Split a media file into equal-duration parts without re-encoding"
)]
pub struct Cli {
    /// Input media file
    #[arg(required_unless_present = "check_tools")]
    pub input: Option<PathBuf>,

    /// Number of segments (default: 2, or split.count from config)
    #[arg(short = 'n', long = "split_count", visible_alias = "split-count")]
    pub split_count: Option<u32>,

    /// Stop at the first segment that fails to extract
    #[arg(long)]
    pub fail_fast: bool,

    /// Show the planned segments without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,

    /// Check that ffmpeg and ffprobe are available, then exit
    #[arg(long)]
    pub check_tools: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
