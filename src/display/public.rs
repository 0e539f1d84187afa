//! Sales-listing layout with every machine-identifying value removed.

use super::simple::{gpu_cores, macos_marketing_name, memory_text, report_screen_size};
use super::UNKNOWN;
use crate::data::{Report, Section};
use crate::utils::parsing::{format_size, UnitBase};
use regex::Regex;
use std::sync::OnceLock;

const REDACTED: &str = "[REDACTED]";

pub(super) fn render(report: &Report) -> String {
    redact(&layout(report), &report.identifying_tokens())
}

fn layout(report: &Report) -> String {
    let hw = report.hardware.as_ref();
    let or_unknown = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());

    let model_name = hw.and_then(|h| h.model_name.clone());
    let model = match (report_screen_size(report), &model_name) {
        (Some(size), Some(name)) => Some(format!("{} {}", size, name)),
        (None, name) => name.clone(),
        (Some(_), None) => None,
    };

    let processor = hw.and_then(|h| {
        let chip = h.processor.clone()?;
        let mut parts = vec![chip];
        if let Some(cores) = h.physical_cores {
            parts.push(format!("{}-Core CPU", cores));
        }
        if let Some(gpu) = gpu_cores(report) {
            parts.push(format!("{}-Core GPU", gpu));
        }
        Some(parts.join(" "))
    });

    let drive = report
        .storage
        .as_ref()
        .and_then(|s| s.startup_volume())
        .and_then(|volume| {
            let size = format_size(volume.total_bytes?, UnitBase::Decimal);
            Some(format!("{} {}", size, volume.media_type.label()))
        });

    let mut blocks = vec![
        ("Device", model_name),
        ("Model", model),
        ("Release Date", hw.and_then(|h| h.release_date.clone())),
        ("Processor", processor),
        ("Hard Drive", drive),
        ("Memory", memory_text(report)),
        (
            "macOS",
            hw.and_then(|h| h.macos_version.as_deref()).map(macos_marketing_name),
        ),
    ];
    if report.includes(Section::Battery) {
        let battery = report.battery.as_ref().map(|b| {
            let health = b
                .health_percent
                .map(|h| format!("{:.0}% health", h))
                .unwrap_or_else(|| format!("{} health", UNKNOWN));
            match b.cycle_count {
                Some(cycles) => format!("{}, {} cycles", health, cycles),
                None => health,
            }
        });
        blocks.push(("Battery", battery.or_else(|| Some("None".to_string()))));
    }

    blocks
        .into_iter()
        .map(|(title, value)| format!("# {}\n{}", title, or_unknown(value)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Replace every identifying token and anything shaped like a MAC address.
fn redact(text: &str, tokens: &[String]) -> String {
    static MAC: OnceLock<Option<Regex>> = OnceLock::new();

    let mut tokens: Vec<&str> = tokens.iter().map(String::as_str).filter(|t| !t.is_empty()).collect();
    // longest first so a token that contains another is replaced whole
    tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));

    let mut out = text.to_string();
    for token in tokens {
        out = out.replace(token, REDACTED);
    }
    match MAC
        .get_or_init(|| Regex::new(r"(?i)\b[0-9a-f]{2}(?:[:-][0-9a-f]{2}){5}\b").ok())
        .as_ref()
    {
        Some(re) => re.replace_all(&out, REDACTED).into_owned(),
        None => out,
    }
}
