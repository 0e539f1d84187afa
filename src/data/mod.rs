//! Normalized records produced by the collectors

pub mod hardware;
pub mod power;
pub mod report;

pub use hardware::{
    Architecture, AudioRecord, BluetoothController, GraphicsAdapter, GraphicsRecord, HardwareRecord, MediaType,
    NetworkInterface, NetworkRecord, NetworkSource, StorageRecord, Volume, Vram,
};
pub use power::{BatteryRecord, BatterySource};
pub use report::{Collection, Hint, Report, Section};
