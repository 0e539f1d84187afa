//! String parsing utilities

use regex::Regex;
use std::sync::OnceLock;

/// Unit family used when converting size suffixes to bytes.
///
/// `system_profiler` reports disk capacities in decimal units and memory or
/// VRAM in binary units, both spelled `GB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitBase {
    Decimal,
    Binary,
}

impl UnitBase {
    fn step(self) -> f64 {
        match self {
            UnitBase::Decimal => 1000.0,
            UnitBase::Binary => 1024.0,
        }
    }
}

/// Extract value after a colon and space
pub fn extract_after_colon(line: &str) -> Option<String> {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Split `"494.38 GB"` into `(494.38, "GB")`. A comma is accepted only as a
/// thousands separator followed by exactly three digits, so `"494,38 GB"`
/// from a comma-decimal locale is rejected.
fn split_number_unit(value: &str) -> Option<(f64, &str)> {
    let value = value.trim();
    let end = value
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || *c == ',' || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(value.len());
    let number = &value[..end];
    let mut groups = number.split(',');
    let head = groups.next()?;
    let mut digits = head.to_string();
    for group in groups {
        if digits.contains('.') {
            return None;
        }
        let grouped = group.split('.').next().unwrap_or("");
        if grouped.len() != 3 || !grouped.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    let number = digits.parse::<f64>().ok()?;
    if !number.is_finite() {
        return None;
    }
    Some((number, value[end..].trim()))
}

fn exact_byte_count(value: &str) -> Option<u64> {
    static EXACT: OnceLock<Option<Regex>> = OnceLock::new();
    let re = EXACT
        .get_or_init(|| Regex::new(r"\(([\d,]+)\s*[Bb]ytes\)").ok())
        .as_ref()?;
    let caps = re.captures(value)?;
    caps[1].replace(',', "").parse().ok()
}

/// Parse a size such as `"494.38 GB (494,384,795,648 bytes)"` or `"16 GB"`.
///
/// An exact parenthesised byte count wins over the rounded figure. Returns
/// `None` for anything that does not convert cleanly.
pub fn parse_size(value: &str, base: UnitBase) -> Option<u64> {
    if let Some(bytes) = exact_byte_count(value) {
        return Some(bytes);
    }

    let (number, unit) = split_number_unit(value)?;
    if number < 0.0 {
        return None;
    }
    let unit = unit.split_whitespace().next().unwrap_or("");
    let exponent = match unit.to_ascii_uppercase().as_str() {
        "" | "B" | "BYTE" | "BYTES" => 0,
        "K" | "KB" | "KIB" => 1,
        "M" | "MB" | "MIB" => 2,
        "G" | "GB" | "GIB" => 3,
        "T" | "TB" | "TIB" => 4,
        "P" | "PB" | "PIB" => 5,
        _ => return None,
    };
    Some((number * base.step().powi(exponent)).round() as u64)
}

/// Parse a number carrying an expected unit suffix (`"4837 mAh"`, `"85%"`,
/// `"-2.5 °C"`). A different unit is rejected rather than reinterpreted.
pub fn parse_quantity(value: &str, unit: &str) -> Option<f64> {
    let (number, rest) = split_number_unit(value)?;
    let rest = rest.trim();
    if rest.is_empty() || rest.eq_ignore_ascii_case(unit) {
        return Some(number);
    }
    // "°C" is sometimes written without the degree sign
    if unit == "°C" && rest.eq_ignore_ascii_case("C") {
        return Some(number);
    }
    None
}

/// Parse a plain non-negative integer, tolerating thousands separators.
pub fn parse_count(value: &str) -> Option<u32> {
    let (number, rest) = split_number_unit(value)?;
    if !rest.is_empty() || number < 0.0 || number.fract() != 0.0 {
        return None;
    }
    u32::try_from(number as u64).ok()
}

/// Parse the leading integer of a value, ignoring whatever follows
/// (`"10 (6 performance and 4 efficiency)"`).
pub fn parse_leading_count(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// `Yes`/`No` style flags used across system_profiler output.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "enabled" | "on" | "1" => Some(true),
        "no" | "false" | "disabled" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Format uptime from seconds
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3600;
    let minutes = (seconds % 3600) / 60;

    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("{} {}", n, unit)
        } else {
            format!("{} {}s", n, unit)
        }
    };

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(plural(days, "day"));
    }
    if hours > 0 {
        parts.push(plural(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(plural(minutes, "minute"));
    }

    if parts.is_empty() {
        "0 minutes".to_string()
    } else {
        parts.join(" ")
    }
}

/// Human readable size, e.g. `494.38 GB` or `16 GB`.
pub fn format_size(bytes: u64, base: UnitBase) -> String {
    const UNITS: [&str; 6] = ["bytes", "KB", "MB", "GB", "TB", "PB"];

    let step = base.step();
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= step && unit < UNITS.len() - 1 {
        value /= step;
        unit += 1;
    }

    if unit == 0 {
        return format!("{} bytes", bytes);
    }
    let number = format!("{:.2}", value);
    let number = number.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", number, UNITS[unit])
}
