//! about-this-mac library
//!
//! Collects hardware, battery, storage, graphics, audio and network details
//! from the macOS diagnostic commands and renders them as text, JSON, YAML,
//! markdown or a short summary.

pub mod collectors;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod profiler;
pub mod raw;
pub mod utils;

pub use data::{Collection, Hint, Report, Section};
pub use display::{render, OutputFormat, RenderOptions};
pub use error::{AboutMacError, CommandError, Result};
pub use utils::command::{CommandRunner, SystemCommandRunner};

use chrono::{DateTime, Utc};
use tracing::debug;

/// Collect the requested sections, one after another.
///
/// Never fails: whatever a section's commands refuse to say is left unknown
/// and explained by a [`Hint`] where possible.
pub fn collect_report(runner: &dyn CommandRunner, sections: &[Section], now: DateTime<Utc>) -> Collection {
    let mut report = Report::new(sections);
    report.collected_at = Some(now);
    let mut hints = Vec::new();

    for section in report.sections.clone() {
        debug!(%section, "collecting");
        match section {
            Section::Hardware => {
                report.hardware = collectors::hardware::collect_hardware(runner, &mut hints, now)
            }
            Section::Battery => report.battery = collectors::power::collect_battery(runner, &mut hints),
            Section::Storage => report.storage = collectors::storage::collect_storage(runner, &mut hints),
            Section::Graphics => {
                report.graphics = collectors::graphics::collect_graphics(runner, &mut hints)
            }
            Section::Audio => report.audio = collectors::audio::collect_audio(runner, &mut hints),
            Section::Network => report.network = collectors::network::collect_network(runner, &mut hints),
        }
    }

    Collection { report, hints }
}
