//! Shared fixture runner for integration tests.

#![allow(dead_code)]

use about_this_mac::{CommandError, CommandRunner};
use std::cell::RefCell;
use std::collections::HashMap;

pub const HARDWARE: &str = include_str!("../fixtures/sp_hardware.txt");
pub const SOFTWARE: &str = include_str!("../fixtures/sp_software.txt");
pub const POWER: &str = include_str!("../fixtures/sp_power.txt");
pub const STORAGE: &str = include_str!("../fixtures/sp_storage.txt");
pub const DISPLAYS: &str = include_str!("../fixtures/sp_displays.txt");
pub const AUDIO: &str = include_str!("../fixtures/sp_audio.txt");
pub const PORTS: &str = include_str!("../fixtures/networksetup_ports.txt");
pub const IOREG: &str = include_str!("../fixtures/ioreg_battery.txt");
pub const MEMORY: &str = include_str!("../fixtures/sp_memory.txt");
pub const BLUETOOTH: &str = include_str!("../fixtures/sp_bluetooth.txt");
pub const PRODUCT: &str = include_str!("../fixtures/ioreg_product.txt");

/// Replays canned output keyed by the full command line.
#[derive(Default)]
pub struct FixtureRunner {
    outputs: HashMap<String, Result<String, ()>>,
    calls: RefCell<Vec<String>>,
}

impl FixtureRunner {
    /// A MacBook Pro with every command answering.
    pub fn macbook() -> Self {
        Self::default()
            .with("system_profiler SPHardwareDataType", HARDWARE)
            .with("system_profiler SPSoftwareDataType", SOFTWARE)
            .with("system_profiler SPMemoryDataType", MEMORY)
            .with("system_profiler SPBluetoothDataType", BLUETOOTH)
            .with("ioreg -r -k product-name", PRODUCT)
            .with("system_profiler SPPowerDataType", POWER)
            .with("ioreg -r -n AppleSmartBattery", IOREG)
            .with("system_profiler SPStorageDataType", STORAGE)
            .with("system_profiler SPDisplaysDataType", DISPLAYS)
            .with("system_profiler SPAudioDataType", AUDIO)
            .with("networksetup -listallhardwareports", PORTS)
            .with("sysctl -n hw.memsize", "17179869184\n")
            .with("sysctl -n hw.logicalcpu", "10\n")
    }

    pub fn with(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(command.to_string(), Ok(output.to_string()));
        self
    }

    pub fn denied(mut self, command: &str) -> Self {
        self.outputs.insert(command.to_string(), Err(()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for FixtureRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<String, CommandError> {
        let mut key = program.to_string();
        for arg in args {
            key.push(' ');
            key.push_str(arg);
        }
        self.calls.borrow_mut().push(key.clone());
        match self.outputs.get(&key) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(())) => Err(CommandError::PermissionDenied(program.to_string())),
            None => Err(CommandError::NotFound(program.to_string())),
        }
    }
}
