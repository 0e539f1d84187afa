//! Hardware information collection (model, processor, memory, macOS)

use super::bluetooth::collect_bluetooth;
use super::{record_failure, sysctl, system_profiler};
use crate::data::{Architecture, HardwareRecord, Hint, Section};
use crate::profiler::ProfilerBlock;
use crate::utils::command::CommandRunner;
use crate::utils::parsing::{parse_count, parse_flag, parse_leading_count, parse_size, UnitBase};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Chip names that identify Apple Silicon regardless of other fields.
const APPLE_CHIP_PREFIXES: [&str; 2] = ["Apple M", "Apple A"];

/// Registry keys that may carry a release date, most precise first.
const RELEASE_KEYS: [&str; 3] = ["product-release-date", "product-release", "product-name"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Collect hardware information from system_profiler, topped up with sysctl.
pub fn collect_hardware(
    runner: &dyn CommandRunner,
    hints: &mut Vec<Hint>,
    now: DateTime<Utc>,
) -> Option<HardwareRecord> {
    let mut record = match system_profiler(runner, "SPHardwareDataType") {
        Ok(tree) => parse_hardware(&tree),
        Err(err) => {
            record_failure(hints, Section::Hardware, "system_profiler SPHardwareDataType", &err);
            HardwareRecord::default()
        }
    };

    match system_profiler(runner, "SPSoftwareDataType") {
        Ok(tree) => apply_software(&mut record, &tree),
        Err(err) => record_failure(hints, Section::Hardware, "system_profiler SPSoftwareDataType", &err),
    }

    match system_profiler(runner, "SPMemoryDataType") {
        Ok(tree) => apply_memory_details(&mut record, &tree),
        Err(err) => record_failure(hints, Section::Hardware, "system_profiler SPMemoryDataType", &err),
    }

    fill_from_sysctl(&mut record, runner, now);

    if record == HardwareRecord::default() {
        warn!("no hardware information could be collected");
        hints.push(Hint::Unavailable {
            section: Section::Hardware,
            reason: "system_profiler and sysctl both failed".to_string(),
        });
        return None;
    }

    record.bluetooth = collect_bluetooth(runner, hints);
    record.release_date = registry_release_date(runner)
        .or_else(|| record.processor.as_deref().and_then(chip_release_year));
    Some(record)
}

fn is_apple_chip(name: &str) -> bool {
    APPLE_CHIP_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
}

/// Parse `system_profiler SPHardwareDataType` output.
///
/// Apple Silicon blocks carry `Chip:` and no clock speed; Intel blocks carry
/// `Processor Name:` and `Processor Speed:`. Both land in the same record.
pub fn parse_hardware(tree: &ProfilerBlock) -> HardwareRecord {
    let overview = tree
        .find_block("Hardware Overview")
        .unwrap_or_else(|| tree.unwrap_single());

    let mut record = HardwareRecord {
        model_name: owned(overview.leaf("Model Name")),
        model_identifier: owned(overview.leaf("Model Identifier")),
        model_number: owned(overview.leaf("Model Number")),
        serial_number: owned(overview.leaf_any(&["Serial Number (system)", "Serial Number"])),
        memory_bytes: overview
            .leaf("Memory")
            .and_then(|v| parse_size(v, UnitBase::Binary)),
        ..HardwareRecord::default()
    };

    let chip = overview.leaf("Chip");
    let speed = overview.leaf("Processor Speed");
    let cores = overview.leaf("Total Number of Cores");

    if speed.is_some() && !chip.is_some_and(is_apple_chip) {
        record.architecture = Some(Architecture::Intel);
        record.processor = owned(overview.leaf("Processor Name").or(chip));
        record.processor_speed = owned(speed);
        record.physical_cores = cores.and_then(parse_leading_count);
    } else if chip.is_some() || cores.is_some() || overview.leaf("Processor Name").is_some() {
        record.architecture = Some(Architecture::AppleSilicon);
        record.processor = owned(chip.or_else(|| overview.leaf("Processor Name")));
        if let Some(cores) = cores {
            let (total, performance, efficiency) = parse_core_split(cores);
            record.physical_cores = total;
            record.performance_cores = performance;
            record.efficiency_cores = efficiency;
        }
    }

    record
}

/// `"10 (6 performance and 4 efficiency)"` -> `(10, 6, 4)`.
fn parse_core_split(value: &str) -> (Option<u32>, Option<u32>, Option<u32>) {
    static SPLIT: OnceLock<Option<Regex>> = OnceLock::new();
    let total = parse_leading_count(value);
    let split = SPLIT
        .get_or_init(|| Regex::new(r"(?i)(\d+)\s+performance\s+and\s+(\d+)\s+efficiency").ok())
        .as_ref()
        .and_then(|re| re.captures(value));
    match split {
        Some(caps) => (total, caps[1].parse().ok(), caps[2].parse().ok()),
        None => (total, None, None),
    }
}

/// Pull version and build out of `System Version: macOS 14.2.1 (23C71)`.
pub fn apply_software(record: &mut HardwareRecord, tree: &ProfilerBlock) {
    let Some(system_version) = tree.find_leaf("System Version") else {
        return;
    };
    let (version, build) = parse_system_version(system_version);
    if record.macos_version.is_none() {
        record.macos_version = version;
    }
    if record.macos_build.is_none() {
        record.macos_build = build;
    }
}

fn parse_system_version(value: &str) -> (Option<String>, Option<String>) {
    static VERSION: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(caps) = VERSION
        .get_or_init(|| Regex::new(r"(\d+(?:\.\d+)*)(?:\s*\(([^)]+)\))?").ok())
        .as_ref()
        .and_then(|re| re.captures(value))
    else {
        return (None, None);
    };
    (
        caps.get(1).map(|m| m.as_str().to_string()),
        caps.get(2).map(|m| m.as_str().trim().to_string()),
    )
}

/// Memory type, speed, manufacturer and ECC from `system_profiler SPMemoryDataType`.
///
/// Intel machines list per-slot `Speed:` and a slot-level `ECC:` flag. Apple
/// Silicon reports neither; ECC is then only inferred from an ECC memory type.
pub fn apply_memory_details(record: &mut HardwareRecord, tree: &ProfilerBlock) {
    let present = |v: &String| v != "Empty";
    record.memory_type = owned(tree.find_leaf("Type")).filter(present);
    record.memory_speed = owned(tree.find_leaf("Speed")).filter(present);
    record.memory_manufacturer = owned(tree.find_leaf("Manufacturer")).filter(present);
    record.memory_ecc = tree.find_leaf("ECC").and_then(parse_flag).or_else(|| {
        record
            .memory_type
            .as_deref()
            .filter(|t| t.to_ascii_lowercase().contains("ecc"))
            .map(|_| true)
    });
}

/// Look the release date up in the I/O registry, key by key.
fn registry_release_date(runner: &dyn CommandRunner) -> Option<String> {
    RELEASE_KEYS.iter().find_map(|key| {
        let text = runner
            .run("ioreg", &["-r", "-k", *key])
            .map_err(|err| debug!(key, error = %err, "ioreg lookup failed"))
            .ok()?;
        registry_string(&text, key).and_then(|value| decode_release_date(&value))
    })
}

/// `"product-name" = <"MacBook Pro (14-inch, 2023)">` -> the quoted string.
fn registry_string(text: &str, key: &str) -> Option<String> {
    static PROPERTY: OnceLock<Option<Regex>> = OnceLock::new();
    PROPERTY
        .get_or_init(|| Regex::new(r#""([\w-]+)"\s*=\s*<?"([^"]*)""#).ok())
        .as_ref()?
        .captures_iter(text)
        .find(|caps| &caps[1] == key)
        .map(|caps| caps[2].trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `2024-03` -> `Mar 2024`; `MacBook Pro (14-inch, 2023)` -> `2023`.
pub fn decode_release_date(value: &str) -> Option<String> {
    static YEAR_MONTH: OnceLock<Option<Regex>> = OnceLock::new();
    static MARKETING: OnceLock<Option<Regex>> = OnceLock::new();

    let year_month = YEAR_MONTH
        .get_or_init(|| Regex::new(r"^(\d{4})-(\d{1,2})\b").ok())
        .as_ref()
        .and_then(|re| re.captures(value));
    if let Some(caps) = year_month {
        let month: usize = caps[2].parse().ok()?;
        let name = MONTHS.get(month.checked_sub(1)?)?;
        return Some(format!("{} {}", name, &caps[1]));
    }

    MARKETING
        .get_or_init(|| Regex::new(r"\(.*?(\d{4})\)").ok())
        .as_ref()
        .and_then(|re| re.captures(value))
        .map(|caps| caps[1].to_string())
}

/// Introduction year of an Apple Silicon chip family, as a last resort.
pub fn chip_release_year(processor: &str) -> Option<String> {
    static FAMILY: OnceLock<Option<Regex>> = OnceLock::new();
    let caps = FAMILY
        .get_or_init(|| Regex::new(r"^Apple M(\d+)\b").ok())
        .as_ref()?
        .captures(processor)?;
    let year = match caps[1].parse::<u32>().ok()? {
        1 => "2020",
        2 => "2022",
        3 => "2023",
        4 => "2024",
        5 => "2025",
        _ => return None,
    };
    Some(year.to_string())
}

/// Fill the gaps system_profiler left, and take the exact memory size.
fn fill_from_sysctl(record: &mut HardwareRecord, runner: &dyn CommandRunner, now: DateTime<Utc>) {
    match sysctl(runner, "hw.memsize").and_then(|v| v.parse::<u64>().ok()) {
        Some(bytes) => record.memory_bytes = Some(bytes),
        None => debug!("hw.memsize unavailable, keeping system_profiler memory figure"),
    }

    if record.model_identifier.is_none() {
        record.model_identifier = sysctl(runner, "hw.model");
    }

    if record.processor.is_none() {
        record.processor = sysctl(runner, "machdep.cpu.brand_string");
    }
    if record.architecture.is_none() {
        record.architecture = record.processor.as_deref().and_then(|p| {
            if is_apple_chip(p) {
                Some(Architecture::AppleSilicon)
            } else if p.contains("Intel") {
                Some(Architecture::Intel)
            } else {
                None
            }
        });
    }

    if record.physical_cores.is_none() {
        record.physical_cores = sysctl(runner, "hw.physicalcpu").and_then(|v| parse_count(&v));
    }
    record.logical_cpus = sysctl(runner, "hw.logicalcpu")
        .or_else(|| sysctl(runner, "hw.ncpu"))
        .and_then(|v| parse_count(&v));

    if record.architecture == Some(Architecture::AppleSilicon) {
        if record.performance_cores.is_none() {
            record.performance_cores =
                sysctl(runner, "hw.perflevel0.physicalcpu").and_then(|v| parse_count(&v));
        }
        if record.efficiency_cores.is_none() {
            record.efficiency_cores =
                sysctl(runner, "hw.perflevel1.physicalcpu").and_then(|v| parse_count(&v));
        }
    }

    if record.macos_version.is_none() {
        record.macos_version = sysctl(runner, "kern.osproductversion");
    }
    if record.macos_build.is_none() {
        record.macos_build = sysctl(runner, "kern.osversion");
    }

    record.uptime_seconds = sysctl(runner, "kern.boottime")
        .and_then(|v| parse_boot_time(&v))
        .and_then(|boot| u64::try_from(now.timestamp() - boot).ok());
}

/// `{ sec = 1700000000, usec = 123456 } Tue Nov 14 22:13:20 2023` -> seconds.
pub fn parse_boot_time(value: &str) -> Option<i64> {
    static BOOT: OnceLock<Option<Regex>> = OnceLock::new();
    let caps = BOOT
        .get_or_init(|| Regex::new(r"\bsec\s*=\s*(\d+)").ok())
        .as_ref()?
        .captures(value)?;
    caps[1].parse().ok()
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::testing::FakeRunner;
    use chrono::TimeZone;

    const APPLE_SILICON: &str = "Hardware:

    Hardware Overview:

      Model Name: MacBook Pro
      Model Identifier: Mac14,9
      Model Number: MPHE3LL/A
      Chip: Apple M2 Pro
      Total Number of Cores: 10 (6 performance and 4 efficiency)
      Memory: 16 GB
      System Firmware Version: 10151.81.1
      Serial Number (system): C02XK1ABCD12
      Hardware UUID: 00000000-0000-0000-0000-000000000000
";

    const INTEL: &str = "Hardware:

    Hardware Overview:

      Model Name: MacBook Pro
      Model Identifier: MacBookPro16,1
      Processor Name: Intel Core i7
      Processor Speed: 2.6 GHz
      Number of Processors: 1
      Total Number of Cores: 6
      L2 Cache (per Core): 256 KB
      Hyper-Threading Technology: Enabled
      Memory: 16 GB
      Serial Number (system): C02ZZ9XYLVDQ
";

    #[test]
    fn apple_silicon_block_uses_chip() {
        let record = parse_hardware(&ProfilerBlock::parse(APPLE_SILICON));
        assert_eq!(record.architecture, Some(Architecture::AppleSilicon));
        assert_eq!(record.processor.as_deref(), Some("Apple M2 Pro"));
        assert_eq!(record.processor_speed, None);
        assert_eq!(record.physical_cores, Some(10));
        assert_eq!(record.performance_cores, Some(6));
        assert_eq!(record.efficiency_cores, Some(4));
        assert_eq!(record.memory_bytes, Some(16 * 1024 * 1024 * 1024));
        assert_eq!(record.serial_number.as_deref(), Some("C02XK1ABCD12"));
        assert_eq!(record.model_number.as_deref(), Some("MPHE3LL/A"));
    }

    #[test]
    fn bare_chip_without_speed_is_apple_silicon() {
        let record = parse_hardware(&ProfilerBlock::parse("Hardware Overview:\n  Chip: Apple M2\n"));
        assert_eq!(record.processor.as_deref(), Some("Apple M2"));
        assert_eq!(record.architecture, Some(Architecture::AppleSilicon));
    }

    #[test]
    fn intel_block_uses_processor_fields() {
        let record = parse_hardware(&ProfilerBlock::parse(INTEL));
        assert_eq!(record.architecture, Some(Architecture::Intel));
        assert_eq!(record.processor.as_deref(), Some("Intel Core i7"));
        assert_eq!(record.processor_speed.as_deref(), Some("2.6 GHz"));
        assert_eq!(record.physical_cores, Some(6));
        assert_eq!(record.performance_cores, None);
    }

    #[test]
    fn empty_block_leaves_everything_unknown() {
        let record = parse_hardware(&ProfilerBlock::parse("garbage"));
        assert_eq!(record, HardwareRecord::default());
    }

    #[test]
    fn software_version_and_build() {
        let tree = ProfilerBlock::parse(
            "Software:\n\n    System Software Overview:\n\n      System Version: macOS 14.2.1 (23C71)\n      Kernel Version: Darwin 23.2.0\n",
        );
        let mut record = HardwareRecord::default();
        apply_software(&mut record, &tree);
        assert_eq!(record.macos_version.as_deref(), Some("14.2.1"));
        assert_eq!(record.macos_build.as_deref(), Some("23C71"));
    }

    #[test]
    fn boot_time_is_extracted() {
        assert_eq!(
            parse_boot_time("{ sec = 1700000000, usec = 123456 } Tue Nov 14 22:13:20 2023"),
            Some(1_700_000_000)
        );
        assert_eq!(parse_boot_time("garbage"), None);
    }

    #[test]
    fn sysctl_fills_gaps_when_profiler_is_denied() {
        let runner = FakeRunner::default()
            .denied("system_profiler SPHardwareDataType")
            .with("sysctl -n hw.memsize", "17179869184\n")
            .with("sysctl -n hw.model", "Mac14,9\n")
            .with("sysctl -n machdep.cpu.brand_string", "Apple M2 Pro\n")
            .with("sysctl -n hw.physicalcpu", "10\n")
            .with("sysctl -n hw.logicalcpu", "10\n")
            .with("sysctl -n kern.osproductversion", "14.2.1\n")
            .with("sysctl -n kern.boottime", "{ sec = 1700000000, usec = 0 } Tue Nov 14 22:13:20 2023\n");
        let now = Utc.timestamp_opt(1_700_003_600, 0).unwrap();
        let mut hints = Vec::new();

        let record = collect_hardware(&runner, &mut hints, now).unwrap();

        assert_eq!(record.model_identifier.as_deref(), Some("Mac14,9"));
        assert_eq!(record.processor.as_deref(), Some("Apple M2 Pro"));
        assert_eq!(record.architecture, Some(Architecture::AppleSilicon));
        assert_eq!(record.memory_bytes, Some(17_179_869_184));
        assert_eq!(record.logical_cpus, Some(10));
        assert_eq!(record.uptime_seconds, Some(3600));
        assert_eq!(record.serial_number, None);
        assert!(matches!(hints.as_slice(), [Hint::RequiresPrivileges { section: Section::Hardware, .. }]));
    }

    #[test]
    fn intel_memory_speed_and_ecc() {
        let tree = ProfilerBlock::parse(
            "Memory:

    Memory Slots:

      ECC: Enabled
      Upgradeable Memory: Yes

        DIMM1/1:

          Size: 16 GB
          Type: DDR4 ECC
          Speed: 2666 MHz
          Status: OK
          Manufacturer: 0x80CE
",
        );
        let mut record = HardwareRecord::default();
        apply_memory_details(&mut record, &tree);
        assert_eq!(record.memory_speed.as_deref(), Some("2666 MHz"));
        assert_eq!(record.memory_type.as_deref(), Some("DDR4 ECC"));
        assert_eq!(record.memory_ecc, Some(true));
    }

    #[test]
    fn apple_silicon_memory_has_no_speed() {
        let tree = ProfilerBlock::parse("Memory:\n\n      Memory: 16 GB\n      Type: LPDDR5\n      Manufacturer: Hynix\n");
        let mut record = HardwareRecord::default();
        apply_memory_details(&mut record, &tree);
        assert_eq!(record.memory_type.as_deref(), Some("LPDDR5"));
        assert_eq!(record.memory_speed, None);
        assert_eq!(record.memory_ecc, None);
    }

    #[test]
    fn release_dates_are_decoded() {
        assert_eq!(decode_release_date("2024-03").as_deref(), Some("Mar 2024"));
        assert_eq!(decode_release_date("MacBook Pro (14-inch, 2023)").as_deref(), Some("2023"));
        assert_eq!(decode_release_date("2024-13"), None);
        assert_eq!(decode_release_date("J414s"), None);
        assert_eq!(chip_release_year("Apple M3 Max").as_deref(), Some("2023"));
        assert_eq!(chip_release_year("Intel Core i7"), None);
    }

    #[test]
    fn registry_release_date_wins() {
        let runner = FakeRunner::default()
            .with("system_profiler SPHardwareDataType", APPLE_SILICON)
            .with("ioreg -r -k product-release-date", "\"product-release-date\" = <\"2023-01\">\n");
        let mut hints = Vec::new();
        let record = collect_hardware(&runner, &mut hints, Utc::now()).unwrap();
        assert_eq!(record.release_date.as_deref(), Some("Jan 2023"));
        assert!(!runner.called("ioreg -r -k product-name"));
    }

    #[test]
    fn nothing_available_means_no_record() {
        let runner = FakeRunner::default();
        let mut hints = Vec::new();
        assert!(collect_hardware(&runner, &mut hints, Utc::now()).is_none());
        assert!(hints.iter().any(|h| matches!(h, Hint::Unavailable { .. })));
    }
}
