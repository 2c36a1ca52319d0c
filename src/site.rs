use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Result};
use spdlog::prelude::*;

use crate::normalize::{self, Report};
use crate::storage;

/// Reads the domain list, one trimmed domain per non-blank line, in file
/// order. Duplicates are kept.
pub fn load_domains(path: &Path) -> Result<Vec<String>> {
    let data = storage::read(path)?;
    Ok(data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

pub struct Site {
    pub domain: String,
    pub found: usize,
    pub urls: Vec<String>,
    pub report: Report,
}

impl Site {
    pub fn new(domain: String, raw: &[String], placeholder: &str) -> Self {
        let (urls, report) = normalize::clean_urls(raw, placeholder);
        Site {
            domain,
            found: raw.len(),
            urls,
            report,
        }
    }

    /// `<dir>/<domain>.txt`, refused unless `<domain>.txt` is a single
    /// plain file name.
    pub fn output_path(&self, dir: &Path) -> Result<PathBuf> {
        let file_name = format!("{}.txt", self.domain);
        let mut components = Path::new(&file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) if !file_name.contains('\\') => {}
            _ => bail!("domain {:?} is not usable as a file name", self.domain),
        }
        Ok(dir.join(file_name))
    }

    /// Writes the cleaned URLs to `<dir>/<domain>.txt`, creating `dir` if
    /// needed. Nothing is written when no URL survived cleaning.
    pub fn save(&self, dir: &Path) -> Result<Option<PathBuf>> {
        if self.urls.is_empty() {
            return Ok(None);
        }
        let path = self.output_path(dir)?;
        storage::create_dir(dir)?;
        storage::write_lines(&path, &self.urls)?;
        Ok(Some(path))
    }

    pub fn log_summary(&self) {
        info!("Cleaning URLs for {}", self.domain);
        info!("Found {} URLs", self.found);
        info!("Found {} URLs after cleaning", self.urls.len());
        if self.report.dropped() > 0 {
            warn!(
                "{}: dropped {} URLs (no query string: {}, no parameters: {}, repeated http(s):// scheme, including redirect URLs in values: {})",
                self.domain,
                self.report.dropped(),
                self.report.no_query,
                self.report.no_params,
                self.report.repeated_scheme,
            );
        }
        debug!(
            "{}: {} duplicates collapsed",
            self.domain, self.report.duplicates
        );
    }
}
