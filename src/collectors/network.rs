//! Network interface collection
//!
//! `networksetup -listallhardwareports` gives port names and hardware
//! addresses. `netstat -i` is the fallback and only yields device names.

use super::record_failure;
use crate::data::{Hint, NetworkInterface, NetworkRecord, NetworkSource, Section};
use crate::utils::command::CommandRunner;
use crate::utils::parsing::extract_after_colon;
use tracing::debug;

pub fn collect_network(runner: &dyn CommandRunner, hints: &mut Vec<Hint>) -> Option<NetworkRecord> {
    match runner.run("networksetup", &["-listallhardwareports"]) {
        Ok(text) => {
            let interfaces = parse_hardware_ports(&text);
            if !interfaces.is_empty() {
                return Some(NetworkRecord {
                    source: NetworkSource::HardwarePorts,
                    interfaces,
                });
            }
            debug!("networksetup listed no ports, trying netstat");
        }
        Err(err) => record_failure(hints, Section::Network, "networksetup -listallhardwareports", &err),
    }

    match runner.run("netstat", &["-i"]) {
        Ok(text) => Some(NetworkRecord {
            source: NetworkSource::Netstat,
            interfaces: parse_netstat(&text),
        }),
        Err(err) => {
            record_failure(hints, Section::Network, "netstat -i", &err);
            hints.push(Hint::Unavailable {
                section: Section::Network,
                reason: "networksetup and netstat both failed".to_string(),
            });
            None
        }
    }
}

/// Parse `networksetup -listallhardwareports`. Stops at the VLAN listing.
pub fn parse_hardware_ports(text: &str) -> Vec<NetworkInterface> {
    let mut interfaces = Vec::new();
    let mut port: Option<String> = None;
    let mut current: Option<NetworkInterface> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.starts_with("VLAN Configurations") {
            break;
        }
        let Some((key, _)) = line.split_once(':') else {
            continue;
        };
        let value = extract_after_colon(line);
        match key.trim() {
            "Hardware Port" => {
                interfaces.extend(current.take());
                port = value;
            }
            "Device" => {
                if let Some(device) = value {
                    interfaces.extend(current.take());
                    current = Some(NetworkInterface {
                        device,
                        hardware_port: port.take(),
                        mac_address: None,
                    });
                }
            }
            "Ethernet Address" => {
                if let Some(iface) = current.as_mut() {
                    iface.mac_address = value.filter(|v| !v.eq_ignore_ascii_case("N/A"));
                }
            }
            _ => {}
        }
    }
    interfaces.extend(current);
    interfaces
}

/// First column of `netstat -i`, deduplicated in order of appearance.
pub fn parse_netstat(text: &str) -> Vec<NetworkInterface> {
    let mut interfaces: Vec<NetworkInterface> = Vec::new();
    for line in text.lines() {
        let Some(name) = line.split_whitespace().next() else {
            continue;
        };
        if name == "Name" {
            continue;
        }
        let device = name.trim_end_matches('*');
        if device.is_empty() || interfaces.iter().any(|i| i.device == device) {
            continue;
        }
        interfaces.push(NetworkInterface {
            device: device.to_string(),
            hardware_port: None,
            mac_address: None,
        });
    }
    interfaces
}
