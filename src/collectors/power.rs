//! Battery collection
//!
//! `system_profiler SPPowerDataType` is the primary source. When it fails the
//! much terser `pmset -g batt` is used instead. When it succeeds, the
//! AppleSmartBattery registry entry fills in design capacity, temperature and
//! the rest of what the profiler omits.

use super::{record_failure, system_profiler};
use crate::data::{BatteryRecord, BatterySource, Hint, Section};
use crate::profiler::ProfilerBlock;
use crate::utils::command::CommandRunner;
use crate::utils::parsing::{parse_count, parse_flag, parse_quantity};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Larger readings come from a garbled registry dump.
const MAX_PLAUSIBLE_WATTS: f64 = 1000.0;

/// Collect battery state. `None` means the machine has no battery or no
/// source could describe it.
pub fn collect_battery(runner: &dyn CommandRunner, hints: &mut Vec<Hint>) -> Option<BatteryRecord> {
    match system_profiler(runner, "SPPowerDataType") {
        Ok(tree) if !tree.is_empty() => {
            let mut record = parse_power_profile(&tree)?;
            match runner.run("ioreg", &["-r", "-n", "AppleSmartBattery"]) {
                Ok(text) => apply_ioreg(&mut record, &text),
                Err(err) => record_failure(hints, Section::Battery, "ioreg -r -n AppleSmartBattery", &err),
            }
            Some(record)
        }
        Ok(_) => {
            debug!("SPPowerDataType printed nothing, trying pmset");
            collect_from_pmset(runner, hints)
        }
        Err(err) => {
            record_failure(hints, Section::Battery, "system_profiler SPPowerDataType", &err);
            collect_from_pmset(runner, hints)
        }
    }
}

fn collect_from_pmset(runner: &dyn CommandRunner, hints: &mut Vec<Hint>) -> Option<BatteryRecord> {
    match runner.run("pmset", &["-g", "batt"]) {
        Ok(text) => parse_pmset_batt(&text),
        Err(err) => {
            record_failure(hints, Section::Battery, "pmset -g batt", &err);
            hints.push(Hint::Unavailable {
                section: Section::Battery,
                reason: "system_profiler and pmset both failed".to_string(),
            });
            None
        }
    }
}

/// Parse `system_profiler SPPowerDataType`. Returns `None` when there is no
/// `Battery Information` block, which is how desktops report.
pub fn parse_power_profile(tree: &ProfilerBlock) -> Option<BatteryRecord> {
    let info = tree.find_block("Battery Information")?;
    let mut record = BatteryRecord::empty(BatterySource::SystemProfiler);

    record.serial_number = info
        .block("Model Information")
        .and_then(|model| model.leaf("Serial Number"))
        .map(str::to_string);

    let charge = info.block("Charge Information").unwrap_or(info);
    record.charging = charge.leaf("Charging").and_then(parse_flag);
    record.full_charge_capacity_mah = charge
        .leaf("Full Charge Capacity (mAh)")
        .and_then(parse_count);

    let remaining = charge.leaf("Charge Remaining (mAh)").and_then(parse_count);
    record.charge_percent = charge
        .leaf("State of Charge (%)")
        .and_then(parse_count)
        .filter(|pct| *pct <= 100)
        .and_then(|pct| u8::try_from(pct).ok())
        .or_else(|| charge_ratio(remaining?, record.full_charge_capacity_mah?));

    let health = info.block("Health Information").unwrap_or(info);
    record.cycle_count = health.leaf("Cycle Count").and_then(parse_count);
    record.condition = health.leaf("Condition").map(str::to_string);
    record.health_percent = health
        .leaf("Maximum Capacity")
        .and_then(|v| parse_quantity(v, "%"));

    // Low Power Mode lives under the AC/battery power profiles, not the battery block
    record.low_power_mode = tree
        .find_leaves("Low Power Mode")
        .into_iter()
        .filter_map(parse_flag)
        .reduce(|a, b| a || b);

    Some(record)
}

fn charge_ratio(remaining: u32, full: u32) -> Option<u8> {
    if full == 0 {
        return None;
    }
    let pct = (f64::from(remaining) / f64::from(full) * 100.0).round().min(100.0);
    u8::try_from(pct as u32).ok()
}

/// Integer properties from `ioreg -r -n AppleSmartBattery`. The first
/// occurrence of a key wins; nested dictionaries repeat some names.
/// Values that fit neither `i64` nor `u64` are dropped.
fn ioreg_values(text: &str) -> HashMap<String, i64> {
    static PROPERTY: OnceLock<Option<Regex>> = OnceLock::new();
    let mut values = HashMap::new();
    let Some(re) = PROPERTY
        .get_or_init(|| Regex::new(r#""(\w+)"\s*=\s*(-?\d+)"#).ok())
        .as_ref()
    else {
        return values;
    };
    for caps in re.captures_iter(text) {
        match register(&caps[2]) {
            Some(value) => {
                values.entry(caps[1].to_string()).or_insert(value);
            }
            None => debug!(key = &caps[1], "ignoring out of range register"),
        }
    }
    values
}

/// ioreg prints signed registers as unsigned 64-bit values.
fn register(digits: &str) -> Option<i64> {
    digits
        .parse::<i64>()
        .ok()
        .or_else(|| digits.parse::<u64>().ok().map(|v| v as i64))
}

/// Merge registry values into a profiler-derived record.
pub fn apply_ioreg(record: &mut BatteryRecord, text: &str) {
    let values = ioreg_values(text);
    if values.is_empty() {
        debug!("ioreg printed no battery properties");
        return;
    }
    let get_u32 = |key: &str| values.get(key).and_then(|v| u32::try_from(*v).ok());

    if let Some(design) = get_u32("DesignCapacity").filter(|d| *d > 0) {
        record.design_capacity_mah = Some(design);
    }
    if let Some(raw_max) = get_u32("AppleRawMaxCapacity").filter(|m| *m > 0) {
        record.full_charge_capacity_mah = Some(raw_max);
    }
    if record.cycle_count.is_none() {
        record.cycle_count = get_u32("CycleCount");
    }
    if let Some(temp) = values.get("Temperature") {
        record.temperature_celsius = Some(*temp as f64 / 100.0);
    }
    if let Some(packed) = get_u32("ManufactureDate") {
        record.manufacture_date = decode_manufacture_date(packed);
    }

    if let (Some(mv), Some(ma)) = (values.get("Voltage"), values.get("Amperage")) {
        let watts = if record.charging == Some(false) {
            Some(0.0)
        } else {
            mv.checked_mul(*ma)
                .and_then(i64::checked_abs)
                .map(|uw| uw as f64 / 1_000_000.0)
        };
        match watts {
            Some(watts) if watts <= MAX_PLAUSIBLE_WATTS => record.charging_watts = Some(watts),
            Some(watts) => warn!(watts, "ignoring implausible charging power"),
            None => warn!("charging power overflowed"),
        }
    }

    if let (Some(design), Some(full)) = (record.design_capacity_mah, record.full_charge_capacity_mah) {
        record.health_percent = Some(f64::from(full) * 100.0 / f64::from(design));
    }
}

/// Smart Battery date word: day in bits 0-4, month in 5-8, years since 1980 above.
pub fn decode_manufacture_date(packed: u32) -> Option<NaiveDate> {
    let day = packed & 0x1f;
    let month = (packed >> 5) & 0x0f;
    let year = 1980 + (packed >> 9);
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Parse `pmset -g batt`:
///
/// ```text
/// Now drawing from 'Battery Power'
///  -InternalBattery-0 (id=1234567)	85%; charging; 1:23 remaining present: true
/// ```
pub fn parse_pmset_batt(text: &str) -> Option<BatteryRecord> {
    static BATT: OnceLock<Option<Regex>> = OnceLock::new();
    let caps = BATT
        .get_or_init(|| Regex::new(r"(\d{1,3})%;\s*([^;]+)").ok())
        .as_ref()?
        .captures(text)?;

    let mut record = BatteryRecord::empty(BatterySource::Pmset);
    record.charge_percent = caps[1].parse::<u8>().ok().filter(|pct| *pct <= 100);
    let state = caps[2].trim().to_ascii_lowercase();
    record.charging = match state.as_str() {
        "charging" | "finishing charge" => Some(true),
        "discharging" | "charged" | "ac attached" | "not charging" => Some(false),
        _ => None,
    };
    Some(record)
}
