//! Battery information structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which command the battery figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatterySource {
    SystemProfiler,
    Pmset,
}

impl BatterySource {
    pub fn label(self) -> &'static str {
        match self {
            BatterySource::SystemProfiler => "system_profiler",
            BatterySource::Pmset => "pmset",
        }
    }
}

/// Battery state. Absent from the report on desktop Macs.
///
/// `health_percent` is passed through as reported; aged batteries can show
/// more than 100% and that is kept for diagnosis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryRecord {
    pub source: BatterySource,
    pub charge_percent: Option<u8>,
    pub charging: Option<bool>,
    pub health_percent: Option<f64>,
    pub condition: Option<String>,
    pub cycle_count: Option<u32>,
    pub design_capacity_mah: Option<u32>,
    pub full_charge_capacity_mah: Option<u32>,
    pub temperature_celsius: Option<f64>,
    pub manufacture_date: Option<NaiveDate>,
    pub charging_watts: Option<f64>,
    pub low_power_mode: Option<bool>,
    pub serial_number: Option<String>,
}

impl BatteryRecord {
    /// A record with nothing known yet.
    pub fn empty(source: BatterySource) -> Self {
        Self {
            source,
            charge_percent: None,
            charging: None,
            health_percent: None,
            condition: None,
            cycle_count: None,
            design_capacity_mah: None,
            full_charge_capacity_mah: None,
            temperature_celsius: None,
            manufacture_date: None,
            charging_watts: None,
            low_power_mode: None,
            serial_number: None,
        }
    }

    pub fn temperature_fahrenheit(&self) -> Option<f64> {
        self.temperature_celsius.map(|c| c * 9.0 / 5.0 + 32.0)
    }
}
