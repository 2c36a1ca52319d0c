use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use spdlog::prelude::*;

pub fn read(path: &Path) -> Result<String> {
    let buf = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let data = String::from_utf8(buf)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    trace!(
        "storage: read {} len={}",
        path.to_string_lossy(),
        data.len()
    );
    Ok(data)
}

pub fn create_dir(dir: &Path) -> Result<()> {
    trace!("storage: mkdir {}", dir.to_string_lossy());
    fs::create_dir_all(dir).with_context(|| format!("creating directory {}", dir.display()))?;
    Ok(())
}

/// Writes each line followed by `\n`, replacing any existing file. The
/// parent directory must already exist.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut data = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        data.push_str(line);
        data.push('\n');
    }
    trace!(
        "storage: write {} lines={} len={}",
        path.to_string_lossy(),
        lines.len(),
        data.len()
    );
    fs::write(path, data).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
