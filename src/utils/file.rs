//! File reading and writing utilities

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Expand a leading `~` the way a shell would.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Safely read a file to string with error handling
pub fn read_file_safe<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Write a rendered report, creating missing parent directories.
pub fn write_output<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut contents = contents.to_string();
    if !contents.ends_with('\n') {
        contents.push('\n');
    }
    fs::write(path, contents)?;
    Ok(())
}

/// File name used for markdown reports when no output path was given,
/// e.g. `mac-info-macbook-pro-2024-03-01.md`.
pub fn default_markdown_filename(model_name: Option<&str>, date: chrono::NaiveDate) -> String {
    let slug: String = model_name
        .unwrap_or("mac")
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let slug = if slug.is_empty() { "mac".to_string() } else { slug };
    format!("mac-info-{}-{}.md", slug, date.format("%Y-%m-%d"))
}
