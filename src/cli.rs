use std::path::PathBuf;

use clap::Parser;
use spdlog::{Level, LevelFilter};

use crate::archive::DEFAULT_ENDPOINT;
use crate::normalize::DEFAULT_PLACEHOLDER;

/// Collect archived URLs with query parameters for a list of domains and
/// turn them into fuzzing templates.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a file containing a list of domains
    #[arg(short = 'l', long = "list")]
    pub list: PathBuf,

    /// Path to the output directory
    #[arg(short, long, default_value = "results")]
    pub output: PathBuf,

    /// Token that replaces every parameter value
    #[arg(short, long, default_value = DEFAULT_PLACEHOLDER)]
    pub placeholder: String,

    /// Archive index endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Proxy for archive requests, e.g. socks5://localhost:1080
    #[arg(long)]
    pub proxy: Option<String>,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn level_filter(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::MoreSevereEqual(Level::Info),
            1 => LevelFilter::MoreSevereEqual(Level::Debug),
            _ => LevelFilter::All,
        }
    }
}
