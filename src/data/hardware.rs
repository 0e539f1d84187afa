//! Hardware-specific information structures

use serde::{Deserialize, Serialize};

/// Which processor family the hardware block described.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    AppleSilicon,
    Intel,
}

impl Architecture {
    pub fn label(self) -> &'static str {
        match self {
            Architecture::AppleSilicon => "Apple Silicon",
            Architecture::Intel => "Intel",
        }
    }
}

/// Machine identity, processor, memory and OS details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HardwareRecord {
    pub model_name: Option<String>,
    pub model_identifier: Option<String>,
    pub model_number: Option<String>,
    pub architecture: Option<Architecture>,
    pub processor: Option<String>,
    /// Only Intel machines report a clock speed.
    pub processor_speed: Option<String>,
    pub physical_cores: Option<u32>,
    pub performance_cores: Option<u32>,
    pub efficiency_cores: Option<u32>,
    pub logical_cpus: Option<u32>,
    pub memory_bytes: Option<u64>,
    pub memory_type: Option<String>,
    pub memory_speed: Option<String>,
    pub memory_manufacturer: Option<String>,
    pub memory_ecc: Option<bool>,
    pub macos_version: Option<String>,
    pub macos_build: Option<String>,
    pub uptime_seconds: Option<u64>,
    /// Best effort: `Mar 2024` from the registry, or just a year.
    pub release_date: Option<String>,
    pub bluetooth: Option<BluetoothController>,
    /// Requires elevated privileges on some systems.
    pub serial_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BluetoothController {
    pub chipset: Option<String>,
    pub firmware_version: Option<String>,
    pub transport: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Ssd,
    Hdd,
    Nvme,
    #[default]
    Unknown,
}

impl MediaType {
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Ssd => "SSD",
            MediaType::Hdd => "HDD",
            MediaType::Nvme => "NVMe",
            MediaType::Unknown => "Unknown",
        }
    }
}

/// One mounted volume. `available_bytes <= total_bytes` whenever both are known.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub name: String,
    pub mount_point: Option<String>,
    pub file_system: Option<String>,
    pub total_bytes: Option<u64>,
    pub available_bytes: Option<u64>,
    pub media_type: MediaType,
    pub device_name: Option<String>,
    pub protocol: Option<String>,
    pub smart_status: Option<String>,
    pub internal: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageRecord {
    pub volumes: Vec<Volume>,
}

impl StorageRecord {
    /// The boot volume: mounted at `/`, then the `Macintosh HD` volume, then
    /// whatever came first.
    pub fn startup_volume(&self) -> Option<&Volume> {
        self.volumes
            .iter()
            .find(|v| v.mount_point.as_deref() == Some("/"))
            .or_else(|| self.volumes.iter().find(|v| v.name == "Macintosh HD"))
            .or_else(|| self.volumes.first())
    }
}

/// Video memory is either dedicated or carved out of system memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Vram {
    Dedicated { bytes: u64 },
    Shared,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsAdapter {
    pub name: String,
    pub vendor: Option<String>,
    pub vram: Option<Vram>,
    pub cores: Option<u32>,
    pub metal_support: Option<String>,
    pub display_count: u32,
    pub main_resolution: Option<String>,
}

/// Empty when `system_profiler` refused to describe the displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphicsRecord {
    pub adapters: Vec<GraphicsAdapter>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioRecord {
    pub devices: Vec<String>,
}

/// Which command the interface list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkSource {
    HardwarePorts,
    Netstat,
}

impl NetworkSource {
    pub fn label(self) -> &'static str {
        match self {
            NetworkSource::HardwarePorts => "networksetup",
            NetworkSource::Netstat => "netstat",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkInterface {
    pub device: String,
    pub hardware_port: Option<String>,
    pub mac_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecord {
    pub source: NetworkSource,
    pub interfaces: Vec<NetworkInterface>,
}
