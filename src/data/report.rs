//! The composite report and its section selection

use super::hardware::{AudioRecord, GraphicsRecord, HardwareRecord, NetworkRecord, StorageRecord};
use super::power::BatteryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One information domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Hardware,
    Battery,
    Storage,
    Graphics,
    Audio,
    Network,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Hardware,
        Section::Battery,
        Section::Storage,
        Section::Graphics,
        Section::Audio,
        Section::Network,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::Hardware => "hardware",
            Section::Battery => "battery",
            Section::Storage => "storage",
            Section::Graphics => "graphics",
            Section::Audio => "audio",
            Section::Network => "network",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Section::Hardware => "Hardware",
            Section::Battery => "Battery",
            Section::Storage => "Storage",
            Section::Graphics => "Graphics",
            Section::Audio => "Audio",
            Section::Network => "Network",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything collected in one invocation.
///
/// Each record is independently optional: a section can be missing because
/// it was not requested, because its commands failed, or (for the battery)
/// because the machine has none. `sections` says which ones were asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub sections: Vec<Section>,
    pub collected_at: Option<DateTime<Utc>>,
    pub hardware: Option<HardwareRecord>,
    pub battery: Option<BatteryRecord>,
    pub storage: Option<StorageRecord>,
    pub graphics: Option<GraphicsRecord>,
    pub audio: Option<AudioRecord>,
    pub network: Option<NetworkRecord>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new(&Section::ALL)
    }
}

impl Report {
    /// An empty report for the given sections (sorted, deduplicated).
    pub fn new(sections: &[Section]) -> Self {
        let mut sections = sections.to_vec();
        sections.sort();
        sections.dedup();
        Self {
            sections,
            collected_at: None,
            hardware: None,
            battery: None,
            storage: None,
            graphics: None,
            audio: None,
            network: None,
        }
    }

    pub fn includes(&self, section: Section) -> bool {
        self.sections.contains(&section)
    }

    /// Serial numbers, model numbers and hardware addresses that must not
    /// appear in redacted output.
    pub fn identifying_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::new();
        if let Some(hw) = &self.hardware {
            tokens.extend(hw.serial_number.clone());
            tokens.extend(hw.model_number.clone());
        }
        if let Some(battery) = &self.battery {
            tokens.extend(battery.serial_number.clone());
        }
        if let Some(network) = &self.network {
            tokens.extend(network.interfaces.iter().filter_map(|i| i.mac_address.clone()));
        }
        tokens.retain(|t| !t.trim().is_empty());
        tokens
    }
}

/// Non-fatal notes for the CLI layer about why data is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hint {
    /// A command was refused; running as root would show more.
    RequiresPrivileges { section: Section, command: String },
    /// Every source for the section failed.
    Unavailable { section: Section, reason: String },
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::RequiresPrivileges { section, command } => write!(
                f,
                "{} information is limited: '{}' needs elevated privileges (try sudo)",
                section.title(),
                command
            ),
            Hint::Unavailable { section, reason } => {
                write!(f, "{} information unavailable: {}", section.title(), reason)
            }
        }
    }
}

/// A report plus the hints gathered while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub report: Report,
    pub hints: Vec<Hint>,
}
