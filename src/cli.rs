//! Command-line argument parsing

use about_this_mac::raw::RawDomain;
use about_this_mac::{OutputFormat, Section};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    Hardware,
    Battery,
    Storage,
    Graphics,
    Audio,
    Network,
    All,
}

/// Mac hardware and system information
#[derive(Parser, Debug)]
#[command(name = "about-this-mac")]
#[command(about = "Gather detailed information about this Mac", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output format (use "public" for a sales-friendly listing)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Sections to include; repeat or separate with commas
    #[arg(short, long = "section", value_enum, value_delimiter = ',')]
    pub sections: Vec<SectionArg>,

    /// Write the report to a file ("-" for stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Force coloured output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file (default: ~/.config/about-this-mac/config.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// Raw hardware command output
    #[arg(long)]
    pub hardware_info: bool,

    /// Raw power and battery command output
    #[arg(long)]
    pub power_info: bool,

    /// Raw graphics command output
    #[arg(long)]
    pub graphics_info: bool,

    /// Raw storage command output
    #[arg(long)]
    pub storage_info: bool,

    /// Raw memory command output
    #[arg(long)]
    pub memory_info: bool,

    /// Raw audio command output
    #[arg(long)]
    pub audio_info: bool,

    /// Raw network command output
    #[arg(long)]
    pub network_info: bool,
}

impl Cli {
    /// Requested sections, or `None` when the flag was not given.
    pub fn selected_sections(&self) -> Option<Vec<Section>> {
        if self.sections.is_empty() {
            return None;
        }
        let mut selected = Vec::new();
        for arg in &self.sections {
            match arg {
                SectionArg::Hardware => selected.push(Section::Hardware),
                SectionArg::Battery => selected.push(Section::Battery),
                SectionArg::Storage => selected.push(Section::Storage),
                SectionArg::Graphics => selected.push(Section::Graphics),
                SectionArg::Audio => selected.push(Section::Audio),
                SectionArg::Network => selected.push(Section::Network),
                SectionArg::All => selected.extend(Section::ALL),
            }
        }
        Some(selected)
    }

    pub fn raw_domains(&self) -> Vec<RawDomain> {
        [
            (self.hardware_info, RawDomain::Hardware),
            (self.power_info, RawDomain::Power),
            (self.graphics_info, RawDomain::Graphics),
            (self.storage_info, RawDomain::Storage),
            (self.memory_info, RawDomain::Memory),
            (self.audio_info, RawDomain::Audio),
            (self.network_info, RawDomain::Network),
        ]
        .into_iter()
        .filter_map(|(set, domain)| set.then_some(domain))
        .collect()
    }
}

/// Terminal state that decides whether colour is used.
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorEnv<'a> {
    pub no_color: Option<&'a str>,
    pub term: Option<&'a str>,
    pub stdout_tty: bool,
}

/// `--color` wins, then `--no-color`, `NO_COLOR`, `TERM=dumb`, file output
/// and a non-terminal stdout each turn colour off.
pub fn color_enabled(cli: &Cli, env: ColorEnv<'_>, to_file: bool) -> bool {
    if cli.color {
        return true;
    }
    if cli.no_color || to_file || !env.stdout_tty {
        return false;
    }
    if env.no_color.is_some_and(|v| !v.is_empty()) {
        return false;
    }
    env.term != Some("dumb")
}
