//! Report rendering
//!
//! [`render`] is the only entry point. Every format takes the same
//! [`Report`] and returns a string; writing it anywhere is the caller's job.

mod color;
mod fields;
mod markdown;
mod public;
mod simple;
mod structured;
mod text;

pub use color::{hex_to_ansi, Palette, RESET};

use crate::data::Report;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for any value that could not be determined.
pub const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Markdown,
    Simple,
    Public,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Simple => "simple",
            OutputFormat::Public => "public",
        };
        f.write_str(name)
    }
}

/// Presentation settings that travel with a single render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Emit ANSI escape codes (text format only).
    pub color: bool,
    pub palette: Palette,
    /// Between a key and its value in the text format.
    pub separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: false,
            palette: Palette::default(),
            separator: ": ".to_string(),
        }
    }
}

pub fn render(report: &Report, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report, options)),
        OutputFormat::Json => structured::to_json(report),
        OutputFormat::Yaml => structured::to_yaml(report),
        OutputFormat::Markdown => Ok(markdown::render(report)),
        OutputFormat::Simple => Ok(simple::render(report)),
        OutputFormat::Public => Ok(public::render(report)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Section;

    #[test]
    fn every_format_handles_an_empty_report() {
        let report = Report::default();
        for format in [
            OutputFormat::Text,
            OutputFormat::Json,
            OutputFormat::Yaml,
            OutputFormat::Markdown,
            OutputFormat::Simple,
            OutputFormat::Public,
        ] {
            let out = render(&report, format, &RenderOptions::default()).unwrap();
            assert!(!out.trim().is_empty(), "{format} rendered nothing");
        }
    }

    #[test]
    fn only_requested_sections_are_rendered() {
        let report = Report::new(&[Section::Audio]);
        let out = render(&report, OutputFormat::Text, &RenderOptions::default()).unwrap();
        assert!(out.contains("Audio"));
        assert!(!out.contains("Battery"));
    }
}
