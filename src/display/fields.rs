//! Labelled rows shared by the text and markdown layouts.

use super::UNKNOWN;
use crate::data::{
    BatteryRecord, GraphicsRecord, HardwareRecord, NetworkRecord, Report, Section, StorageRecord, Vram,
};
use crate::utils::parsing::{format_size, format_uptime, UnitBase};

pub(super) struct Field {
    pub label: &'static str,
    pub value: Option<String>,
}

impl Field {
    fn new(label: &'static str, value: Option<String>) -> Self {
        Self { label, value }
    }

    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(UNKNOWN)
    }
}

/// A run of fields, optionally titled (one volume, one GPU, ...).
pub(super) struct Group {
    pub heading: Option<String>,
    pub fields: Vec<Field>,
}

impl Group {
    fn untitled(fields: Vec<Field>) -> Self {
        Self { heading: None, fields }
    }

    fn titled(heading: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            heading: Some(heading.into()),
            fields,
        }
    }
}

/// One requested section. `groups` is `None` when nothing was collected.
pub(super) struct SectionView {
    pub section: Section,
    pub groups: Option<Vec<Group>>,
}

impl SectionView {
    pub fn unavailable_text(&self) -> String {
        match self.section {
            Section::Battery => "No battery information available".to_string(),
            section => format!("{} information unavailable", section.title()),
        }
    }
}

pub(super) fn section_views(report: &Report) -> Vec<SectionView> {
    report
        .sections
        .iter()
        .map(|&section| {
            let groups = match section {
                Section::Hardware => report.hardware.as_ref().map(hardware_groups),
                Section::Battery => report.battery.as_ref().map(battery_groups),
                Section::Storage => report.storage.as_ref().map(storage_groups),
                Section::Graphics => report.graphics.as_ref().map(graphics_groups),
                Section::Audio => report.audio.as_ref().map(|audio| {
                    let fields = if audio.devices.is_empty() {
                        vec![Field::new("Devices", Some("None".to_string()))]
                    } else {
                        audio
                            .devices
                            .iter()
                            .map(|device| Field::new("Device", Some(device.clone())))
                            .collect()
                    };
                    vec![Group::untitled(fields)]
                }),
                Section::Network => report.network.as_ref().map(network_groups),
            };
            SectionView { section, groups }
        })
        .collect()
}

/// Collection timestamp as printed by the text and markdown layouts.
pub(super) fn generated_text(report: &Report) -> String {
    report
        .collected_at
        .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub(super) fn yes_no(value: Option<bool>) -> Option<String> {
    value.map(|v| if v { "Yes" } else { "No" }.to_string())
}

/// `10 (6 performance and 4 efficiency)`, or just the total.
pub(super) fn core_summary(hw: &HardwareRecord) -> Option<String> {
    let total = hw.physical_cores?;
    Some(match (hw.performance_cores, hw.efficiency_cores) {
        (Some(p), Some(e)) => format!("{} ({} performance and {} efficiency)", total, p, e),
        _ => total.to_string(),
    })
}

pub(super) fn vram_text(vram: Option<Vram>) -> Option<String> {
    vram.map(|v| match v {
        Vram::Dedicated { bytes } => format_size(bytes, UnitBase::Binary),
        Vram::Shared => "Shared with system memory".to_string(),
    })
}

/// `BCM_4387 (22.1.534.2811) via PCIe`, with unknown parts spelled out.
pub(super) fn bluetooth_text(hw: &HardwareRecord) -> Option<String> {
    let bt = hw.bluetooth.as_ref()?;
    let part = |v: &Option<String>| v.clone().unwrap_or_else(|| UNKNOWN.to_string());
    Some(format!(
        "{} ({}) via {}",
        part(&bt.chipset),
        part(&bt.firmware_version),
        part(&bt.transport)
    ))
}

fn hardware_groups(hw: &HardwareRecord) -> Vec<Group> {
    vec![
        Group::titled(
            "Overview",
            vec![
                Field::new("Model", hw.model_name.clone()),
                Field::new("Identifier", hw.model_identifier.clone()),
                Field::new("Model Number", hw.model_number.clone()),
                Field::new("Serial Number", hw.serial_number.clone()),
                Field::new("Release Date", hw.release_date.clone()),
            ],
        ),
        Group::titled(
            "Processor",
            vec![
                Field::new("Chip", hw.processor.clone()),
                Field::new("Architecture", hw.architecture.map(|a| a.label().to_string())),
                Field::new("Speed", hw.processor_speed.clone()),
                Field::new("CPU Cores", core_summary(hw)),
                Field::new("Logical CPUs", hw.logical_cpus.map(|n| n.to_string())),
            ],
        ),
        Group::titled(
            "Memory",
            vec![
                Field::new("Total", hw.memory_bytes.map(|b| format_size(b, UnitBase::Binary))),
                Field::new("Type", hw.memory_type.clone()),
                Field::new("Speed", hw.memory_speed.clone()),
                Field::new("Manufacturer", hw.memory_manufacturer.clone()),
                Field::new("ECC", yes_no(hw.memory_ecc)),
            ],
        ),
        Group::titled(
            "System",
            vec![
                Field::new("macOS Version", hw.macos_version.clone()),
                Field::new("Build", hw.macos_build.clone()),
                Field::new("Uptime", hw.uptime_seconds.map(format_uptime)),
                Field::new("Bluetooth", bluetooth_text(hw)),
            ],
        ),
    ]
}

fn battery_groups(battery: &BatteryRecord) -> Vec<Group> {
    let temperature = battery
        .temperature_celsius
        .zip(battery.temperature_fahrenheit())
        .map(|(c, f)| format!("{:.1}°C / {:.1}°F", c, f));

    vec![Group::untitled(vec![
        Field::new("Source", Some(battery.source.label().to_string())),
        Field::new("Current Charge", battery.charge_percent.map(|p| format!("{}%", p))),
        Field::new("Charging", yes_no(battery.charging)),
        Field::new("Health", battery.health_percent.map(|h| format!("{:.1}%", h))),
        Field::new("Condition", battery.condition.clone()),
        Field::new("Cycle Count", battery.cycle_count.map(|c| c.to_string())),
        Field::new(
            "Full Charge Capacity",
            battery.full_charge_capacity_mah.map(|c| format!("{} mAh", c)),
        ),
        Field::new("Design Capacity", battery.design_capacity_mah.map(|c| format!("{} mAh", c))),
        Field::new("Manufacture Date", battery.manufacture_date.map(|d| d.to_string())),
        Field::new("Temperature", temperature),
        Field::new("Charging Power", battery.charging_watts.map(|w| format!("{:.1} Watts", w))),
        Field::new(
            "Low Power Mode",
            battery
                .low_power_mode
                .map(|on| if on { "Enabled" } else { "Disabled" }.to_string()),
        ),
        Field::new("Serial Number", battery.serial_number.clone()),
    ])]
}

fn storage_groups(storage: &StorageRecord) -> Vec<Group> {
    if storage.volumes.is_empty() {
        return vec![Group::untitled(vec![Field::new("Volumes", Some("None".to_string()))])];
    }
    storage
        .volumes
        .iter()
        .map(|volume| {
            Group::titled(
                volume.name.clone(),
                vec![
                    Field::new("Mount Point", volume.mount_point.clone()),
                    Field::new("File System", volume.file_system.clone()),
                    Field::new("Capacity", volume.total_bytes.map(|b| format_size(b, UnitBase::Decimal))),
                    Field::new(
                        "Available",
                        volume.available_bytes.map(|b| format_size(b, UnitBase::Decimal)),
                    ),
                    Field::new("Type", Some(volume.media_type.label().to_string())),
                    Field::new("Device", volume.device_name.clone()),
                    Field::new("Protocol", volume.protocol.clone()),
                    Field::new("SMART Status", volume.smart_status.clone()),
                    Field::new("Internal", yes_no(volume.internal)),
                ],
            )
        })
        .collect()
}

fn graphics_groups(graphics: &GraphicsRecord) -> Vec<Group> {
    if graphics.adapters.is_empty() {
        return vec![Group::untitled(vec![Field::new("Adapters", Some("None".to_string()))])];
    }
    graphics
        .adapters
        .iter()
        .map(|gpu| {
            Group::titled(
                gpu.name.clone(),
                vec![
                    Field::new("Vendor", gpu.vendor.clone()),
                    Field::new("VRAM", vram_text(gpu.vram)),
                    Field::new("GPU Cores", gpu.cores.map(|c| c.to_string())),
                    Field::new("Metal Support", gpu.metal_support.clone()),
                    Field::new("Displays", Some(gpu.display_count.to_string())),
                    Field::new("Resolution", gpu.main_resolution.clone()),
                ],
            )
        })
        .collect()
}

fn network_groups(network: &NetworkRecord) -> Vec<Group> {
    let mut summary = vec![Field::new("Source", Some(network.source.label().to_string()))];
    if network.interfaces.is_empty() {
        summary.push(Field::new("Interfaces", Some("None".to_string())));
    }
    let mut groups = vec![Group::untitled(summary)];
    groups.extend(network.interfaces.iter().map(|iface| {
        Group::titled(
            iface.device.clone(),
            vec![
                Field::new("Hardware Port", iface.hardware_port.clone()),
                Field::new("MAC Address", iface.mac_address.clone()),
            ],
        )
    }));
    groups
}
