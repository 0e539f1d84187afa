//! End-to-end collection through a fixture runner.

mod common;

use about_this_mac::data::{Architecture, BatterySource, MediaType, NetworkSource, Vram};
use about_this_mac::{collect_report, Hint, Section};
use chrono::{TimeZone, Utc};
use common::FixtureRunner;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

#[test]
fn full_macbook_report() {
    let runner = FixtureRunner::macbook();
    let collection = collect_report(&runner, &Section::ALL, now());
    let report = &collection.report;

    assert!(collection.hints.is_empty(), "{:?}", collection.hints);
    assert_eq!(report.collected_at, Some(now()));

    let hw = report.hardware.as_ref().unwrap();
    assert_eq!(hw.model_name.as_deref(), Some("MacBook Pro"));
    assert_eq!(hw.architecture, Some(Architecture::AppleSilicon));
    assert_eq!(hw.performance_cores, Some(6));
    assert_eq!(hw.memory_bytes, Some(17_179_869_184));
    assert_eq!(hw.macos_version.as_deref(), Some("14.2.1"));
    assert_eq!(hw.macos_build.as_deref(), Some("23C71"));
    assert_eq!(hw.logical_cpus, Some(10));
    assert_eq!(hw.uptime_seconds, None);
    assert_eq!(hw.memory_type.as_deref(), Some("LPDDR5"));
    assert_eq!(hw.memory_ecc, None);
    assert_eq!(hw.release_date.as_deref(), Some("2023"));
    let bluetooth = hw.bluetooth.as_ref().unwrap();
    assert_eq!(bluetooth.chipset.as_deref(), Some("BCM_4387"));
    assert_eq!(bluetooth.transport.as_deref(), Some("PCIe"));

    let battery = report.battery.as_ref().unwrap();
    assert_eq!(battery.source, BatterySource::SystemProfiler);
    assert_eq!(battery.charge_percent, Some(84));
    assert_eq!(battery.charging, Some(false));
    assert_eq!(battery.charging_watts, Some(0.0));
    assert_eq!(battery.design_capacity_mah, Some(5103));
    assert_eq!(battery.temperature_celsius, Some(30.62));

    let storage = report.storage.as_ref().unwrap();
    let startup = storage.startup_volume().unwrap();
    assert_eq!(startup.name, "Macintosh HD");
    assert_eq!(startup.total_bytes, Some(494_384_795_648));
    assert_eq!(startup.available_bytes, Some(120_500_000_000));
    assert_eq!(startup.media_type, MediaType::Nvme);

    let graphics = report.graphics.as_ref().unwrap();
    assert_eq!(graphics.adapters[0].vram, Some(Vram::Shared));
    assert_eq!(graphics.adapters[0].cores, Some(19));

    assert_eq!(report.audio.as_ref().unwrap().devices.len(), 2);

    let network = report.network.as_ref().unwrap();
    assert_eq!(network.source, NetworkSource::HardwarePorts);
    assert_eq!(network.interfaces.len(), 3);
}

#[test]
fn only_requested_sections_run() {
    let runner = FixtureRunner::macbook();
    let collection = collect_report(&runner, &[Section::Audio], now());

    assert_eq!(collection.report.sections, vec![Section::Audio]);
    assert!(collection.report.hardware.is_none());
    assert!(collection.report.audio.is_some());
    assert_eq!(runner.calls(), vec!["system_profiler SPAudioDataType".to_string()]);
}

#[test]
fn denied_battery_falls_back_and_leaves_a_hint() {
    let runner = FixtureRunner::default()
        .denied("system_profiler SPPowerDataType")
        .with(
            "pmset -g batt",
            "Now drawing from 'AC Power'\n -InternalBattery-0 (id=1234)\t85%; charging; 0:20 remaining present: true\n",
        );

    let collection = collect_report(&runner, &[Section::Battery], now());
    let battery = collection.report.battery.unwrap();

    assert_eq!(battery.source, BatterySource::Pmset);
    assert_eq!(battery.charge_percent, Some(85));
    assert_eq!(battery.charging, Some(true));
    assert_eq!(battery.health_percent, None);
    assert_eq!(battery.cycle_count, None);
    assert_eq!(battery.condition, None);
    assert_eq!(battery.serial_number, None);
    assert!(!runner.calls().iter().any(|c| c.starts_with("ioreg")));
    assert!(matches!(
        collection.hints.as_slice(),
        [Hint::RequiresPrivileges { section: Section::Battery, .. }]
    ));
}

#[test]
fn pmset_single_line_form_is_understood() {
    let runner = FixtureRunner::default().denied("system_profiler SPPowerDataType").with(
        "pmset -g batt",
        "Now drawing from 'AC Power' -InternalBattery-0 (id=1234)  85%; charging; 0:20 remaining",
    );

    let battery = collect_report(&runner, &[Section::Battery], now()).report.battery.unwrap();

    assert_eq!(battery.source, BatterySource::Pmset);
    assert_eq!(battery.charge_percent, Some(85));
    assert_eq!(battery.charging, Some(true));
}

#[test]
fn release_year_falls_back_to_the_chip() {
    let runner = FixtureRunner::default()
        .with("system_profiler SPHardwareDataType", common::HARDWARE)
        .with("ioreg -r -k product-name", "");

    let hw = collect_report(&runner, &[Section::Hardware], now()).report.hardware.unwrap();

    assert_eq!(hw.processor.as_deref(), Some("Apple M2 Pro"));
    assert_eq!(hw.release_date.as_deref(), Some("2022"));
    assert_eq!(hw.bluetooth, None);
}

#[test]
fn nothing_answers() {
    let runner = FixtureRunner::default();
    let collection = collect_report(&runner, &Section::ALL, now());
    let report = &collection.report;

    assert!(report.hardware.is_none());
    assert!(report.battery.is_none());
    assert!(report.storage.is_none());
    assert!(report.graphics.is_none());
    assert!(report.audio.is_none());
    assert!(report.network.is_none());
    assert!(collection
        .hints
        .iter()
        .all(|hint| matches!(hint, Hint::Unavailable { .. })));
}
