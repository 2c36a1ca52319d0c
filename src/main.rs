use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use spdlog::prelude::*;

use crate::archive::Archive;
use crate::cli::Cli;
use crate::site::Site;

mod archive;
mod cli;
mod normalize;
mod site;
mod storage;
#[cfg(test)]
mod test_server;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_logger: Arc<Logger> = spdlog::default_logger();
    default_logger.set_level_filter(cli.level_filter());

    run(&cli).await?;
    return Ok(());
}

/// Fetches, cleans and saves every listed domain in order. Only an unusable
/// output directory or domain list fails the run; per-domain failures are
/// logged and skipped.
async fn run(cli: &Cli) -> Result<()> {
    storage::create_dir(&cli.output)?;
    let domains = site::load_domains(&cli.list)?;
    info!("loaded {} domains from {}", domains.len(), cli.list.display());

    let archive = Archive::new(&cli.endpoint, cli.proxy.as_deref())?;

    for domain in domains {
        let urls = match archive.fetch(&domain).await {
            Ok(urls) => urls,
            Err(err) => {
                error!("Error fetching URLs for {}: {:#}", domain, err);
                continue;
            }
        };

        let site = Site::new(domain, &urls, &cli.placeholder);
        site.log_summary();

        match site.save(&cli.output) {
            Ok(Some(path)) => info!("Saved cleaned URLs to {}", path.display()),
            Ok(None) => info!("No URLs found after cleaning, skipping file creation"),
            Err(err) => error!("Error saving cleaned URLs for {}: {:#}", site.domain, err),
        }
    }
    debug!("done, {} domains fetched", archive.cache().len());
    Ok(())
}
