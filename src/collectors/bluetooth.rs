//! Bluetooth controller details from `system_profiler SPBluetoothDataType`.
//!
//! Recent releases list the controller under `Bluetooth Controller:`, older
//! ones under `Hardware, Features, and Settings:`. The controller address is
//! deliberately not kept.

use super::{record_failure, system_profiler};
use crate::data::{BluetoothController, Hint, Section};
use crate::profiler::ProfilerBlock;
use crate::utils::command::CommandRunner;

pub fn collect_bluetooth(runner: &dyn CommandRunner, hints: &mut Vec<Hint>) -> Option<BluetoothController> {
    match system_profiler(runner, "SPBluetoothDataType") {
        Ok(tree) => parse_bluetooth(&tree),
        Err(err) => {
            record_failure(hints, Section::Hardware, "system_profiler SPBluetoothDataType", &err);
            None
        }
    }
}

pub fn parse_bluetooth(tree: &ProfilerBlock) -> Option<BluetoothController> {
    let controller = tree
        .find_block("Bluetooth Controller")
        .or_else(|| tree.find_block("Hardware, Features, and Settings"))?;
    let owned = |key: &str| controller.leaf(key).map(str::to_string);

    let record = BluetoothController {
        chipset: owned("Chipset"),
        firmware_version: owned("Firmware Version"),
        transport: owned("Transport"),
    };
    (record != BluetoothController::default()).then_some(record)
}
