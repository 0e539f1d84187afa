//! The short "About This Mac" summary, plus helpers it shares with the
//! public listing.

use super::UNKNOWN;
use crate::data::Report;
use crate::utils::parsing::{format_size, UnitBase};

/// `14.2.1` -> `Sonoma 14.2.1`. Unrecognised majors are returned as-is.
pub(super) fn macos_marketing_name(version: &str) -> String {
    let major = version.split('.').next().and_then(|m| m.parse::<u32>().ok());
    let name = match major {
        Some(26) => Some("Tahoe"),
        Some(15) => Some("Sequoia"),
        Some(14) => Some("Sonoma"),
        Some(13) => Some("Ventura"),
        Some(12) => Some("Monterey"),
        Some(11) => Some("Big Sur"),
        _ => None,
    };
    match name {
        Some(name) => format!("{} {}", name, version),
        None => version.to_string(),
    }
}

/// Screen diagonal for the built-in panels, keyed on horizontal pixels.
pub(super) fn screen_size(resolution: &str) -> Option<&'static str> {
    let width: u32 = resolution
        .split(|c: char| c == 'x' || c.is_whitespace())
        .find(|part| !part.is_empty())?
        .parse()
        .ok()?;
    match width {
        3456 => Some("16-inch"),
        3024 => Some("14-inch"),
        2560 | 1440 | 1680 => Some("13-inch"),
        2880 | 1920 => Some("15-inch"),
        2304 => Some("12-inch"),
        _ => None,
    }
}

/// Built-in display size from the first adapter reporting a resolution.
pub(super) fn report_screen_size(report: &Report) -> Option<&'static str> {
    report
        .graphics
        .as_ref()?
        .adapters
        .iter()
        .filter_map(|gpu| gpu.main_resolution.as_deref())
        .find_map(screen_size)
}

pub(super) fn memory_text(report: &Report) -> Option<String> {
    report
        .hardware
        .as_ref()?
        .memory_bytes
        .map(|bytes| format_size(bytes, UnitBase::Binary))
}

pub(super) fn gpu_cores(report: &Report) -> Option<u32> {
    report
        .graphics
        .as_ref()?
        .adapters
        .iter()
        .find_map(|gpu| gpu.cores)
}

pub(super) fn render(report: &Report) -> String {
    let hw = report.hardware.as_ref();
    let field = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());

    let mut lines = vec![field(hw.and_then(|h| h.model_name.clone()))];
    let size_and_date = [
        report_screen_size(report).map(str::to_string),
        hw.and_then(|h| h.release_date.clone()),
    ];
    let size_and_date: Vec<String> = size_and_date.into_iter().flatten().collect();
    if !size_and_date.is_empty() {
        lines.push(size_and_date.join(", "));
    }
    lines.push(String::new());

    let startup = report
        .storage
        .as_ref()
        .and_then(|s| s.startup_volume())
        .map(|v| v.name.clone());

    let rows = [
        ("Chip", hw.and_then(|h| h.processor.clone())),
        ("Memory", memory_text(report)),
        ("Startup disk", startup),
        ("Serial number", hw.and_then(|h| h.serial_number.clone())),
        (
            "macOS",
            hw.and_then(|h| h.macos_version.as_deref()).map(macos_marketing_name),
        ),
    ];
    lines.extend(
        rows.into_iter()
            .map(|(label, value)| format!("{:<14}{}", label, field(value))),
    );
    lines.join("\n")
}
