//! Raw mode: print diagnostic command output untouched, under ruled headers.

use crate::utils::command::CommandRunner;

const RULE_WIDTH: usize = 60;

/// Domains whose raw command output can be dumped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDomain {
    Hardware,
    Power,
    Graphics,
    Storage,
    Memory,
    Audio,
    Network,
}

enum Source {
    Command(&'static str, &'static [&'static str]),
    Sysctl(&'static [&'static str]),
}

struct Block {
    title: &'static str,
    source: Source,
}

fn blocks(domain: RawDomain) -> &'static [Block] {
    match domain {
        RawDomain::Hardware => &[
            Block {
                title: "Hardware Information (system_profiler SPHardwareDataType)",
                source: Source::Command("system_profiler", &["SPHardwareDataType"]),
            },
            Block {
                title: "CPU Information (sysctl)",
                source: Source::Sysctl(&["hw.model", "hw.ncpu", "machdep.cpu.brand_string"]),
            },
        ],
        RawDomain::Power => &[
            Block {
                title: "Power Information (system_profiler SPPowerDataType)",
                source: Source::Command("system_profiler", &["SPPowerDataType"]),
            },
            Block {
                title: "Battery Status (pmset)",
                source: Source::Command("pmset", &["-g", "batt"]),
            },
            Block {
                title: "Battery Registry (ioreg)",
                source: Source::Command("ioreg", &["-r", "-n", "AppleSmartBattery"]),
            },
        ],
        RawDomain::Graphics => &[Block {
            title: "Graphics Information (system_profiler SPDisplaysDataType)",
            source: Source::Command("system_profiler", &["SPDisplaysDataType"]),
        }],
        RawDomain::Storage => &[
            Block {
                title: "NVMe Storage Information (system_profiler SPNVMeDataType)",
                source: Source::Command("system_profiler", &["SPNVMeDataType"]),
            },
            Block {
                title: "SATA Storage Information (system_profiler SPSerialATADataType)",
                source: Source::Command("system_profiler", &["SPSerialATADataType"]),
            },
            Block {
                title: "General Storage Information (system_profiler SPStorageDataType)",
                source: Source::Command("system_profiler", &["SPStorageDataType"]),
            },
        ],
        RawDomain::Memory => &[
            Block {
                title: "Memory Information (system_profiler SPMemoryDataType)",
                source: Source::Command("system_profiler", &["SPMemoryDataType"]),
            },
            Block {
                title: "Memory Size (sysctl)",
                source: Source::Sysctl(&["hw.memsize"]),
            },
        ],
        RawDomain::Audio => &[Block {
            title: "Audio Information (system_profiler SPAudioDataType)",
            source: Source::Command("system_profiler", &["SPAudioDataType"]),
        }],
        RawDomain::Network => &[
            Block {
                title: "Network Interfaces (networksetup)",
                source: Source::Command("networksetup", &["-listallhardwareports"]),
            },
            Block {
                title: "Network Status (netstat)",
                source: Source::Command("netstat", &["-i"]),
            },
            Block {
                title: "Bluetooth Information (system_profiler SPBluetoothDataType)",
                source: Source::Command("system_profiler", &["SPBluetoothDataType"]),
            },
        ],
    }
}

/// Run every command for the given domains and join their output.
/// A failed command prints its error in place of output.
pub fn dump(runner: &dyn CommandRunner, domains: &[RawDomain]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = Vec::new();

    for &domain in domains {
        for block in blocks(domain) {
            out.push(String::new());
            out.push(format!("{}:", block.title));
            out.push(rule.clone());
            match &block.source {
                Source::Command(program, args) => match runner.run(program, args) {
                    Ok(text) => out.push(text),
                    Err(err) => out.push(format!("Error: {}", err)),
                },
                Source::Sysctl(keys) => {
                    for key in keys.iter() {
                        let value = runner
                            .run("sysctl", &["-n", *key])
                            .map(|v| v.trim().to_string())
                            .unwrap_or_else(|err| format!("Error: {}", err));
                        out.push(format!("{}: {}", key, value));
                    }
                }
            }
        }
    }
    out.join("\n")
}
