// ABOUTME: Command-line interface definitions using clap
// ABOUTME: Positional credentials plus global output and throttle flags

use crate::api::DEFAULT_API_BASE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blogsync")]
#[command(
    about = "Export blog posts to dated Markdown files, syncing only new posts on later runs",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Re-fetch every page instead of stopping at already exported posts
    #[arg(long)]
    pub all: bool,

    /// Account id used for Basic auth and the feed URL
    pub account_id: String,

    /// Blog id (usually the blog's domain)
    pub blog_id: String,

    /// API key (falls back to BLOGSYNC_API_KEY)
    pub api_key: Option<String>,

    /// Directory that holds the `entries/` tree
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Disable throttling between page requests
    #[arg(long)]
    pub no_throttle: bool,

    /// Throttle range in ms (min:max)
    #[arg(long, value_parser = parse_throttle_range)]
    pub throttle_ms: Option<(u64, u64)>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_throttle_range(s: &str) -> Result<(u64, u64), String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err("Expected format: min:max".into());
    }

    let min = parts[0].parse().map_err(|_| "Invalid min value")?;
    let max = parts[1].parse().map_err(|_| "Invalid max value")?;

    if min > max {
        return Err("min must be <= max".into());
    }

    Ok((min, max))
}
