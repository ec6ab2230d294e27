//! Key trace input
//!
//! One key per line. Surrounding whitespace is trimmed; blank lines and
//! lines starting with `#` are skipped.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};

/// Read a trace from `path`, or from stdin when `path` is `-`
pub fn load(path: &Path) -> Result<Vec<String>> {
    if path == Path::new("-") {
        return load_from(io::stdin().lock()).context("failed to read trace from stdin");
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read trace file {}", path.display()))?;
    Ok(parse(&contents))
}

/// Read a trace from any reader
pub fn load_from(mut reader: impl Read) -> Result<Vec<String>> {
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .context("failed to read trace")?;
    Ok(parse(&contents))
}

pub fn parse(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}
