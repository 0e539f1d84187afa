//! Storage volume collection

use super::{record_failure, system_profiler};
use crate::data::{Hint, MediaType, Section, StorageRecord, Volume};
use crate::profiler::ProfilerBlock;
use crate::utils::command::CommandRunner;
use crate::utils::parsing::{parse_flag, parse_size, UnitBase};
use tracing::warn;

pub fn collect_storage(runner: &dyn CommandRunner, hints: &mut Vec<Hint>) -> Option<StorageRecord> {
    match system_profiler(runner, "SPStorageDataType") {
        Ok(tree) => Some(parse_storage(&tree)),
        Err(err) => {
            record_failure(hints, Section::Storage, "system_profiler SPStorageDataType", &err);
            hints.push(Hint::Unavailable {
                section: Section::Storage,
                reason: "system_profiler SPStorageDataType failed".to_string(),
            });
            None
        }
    }
}

/// Parse `system_profiler SPStorageDataType`. Every block carrying a
/// `Capacity` leaf is a volume; the block name is the volume name.
pub fn parse_storage(tree: &ProfilerBlock) -> StorageRecord {
    let mut volumes = Vec::new();
    gather_volumes(tree, &mut volumes);
    StorageRecord { volumes }
}

fn gather_volumes(block: &ProfilerBlock, volumes: &mut Vec<Volume>) {
    for (name, child) in block.blocks() {
        if child.leaf("Capacity").is_some() {
            volumes.push(parse_volume(name, child));
        } else {
            gather_volumes(child, volumes);
        }
    }
}

fn parse_volume(name: &str, block: &ProfilerBlock) -> Volume {
    let total_bytes = block
        .leaf("Capacity")
        .and_then(|v| parse_size(v, UnitBase::Decimal));
    let mut available_bytes = block
        .leaf_any(&["Free", "Available"])
        .and_then(|v| parse_size(v, UnitBase::Decimal));

    if let (Some(total), Some(available)) = (total_bytes, available_bytes) {
        if available > total {
            warn!(volume = name, total, available, "free space exceeds capacity, discarding");
            available_bytes = None;
        }
    }

    let drive = block.block("Physical Drive");
    let drive_leaf = |key: &str| drive.and_then(|d| d.leaf(key)).map(str::to_string);
    let protocol = drive_leaf("Protocol");

    Volume {
        name: name.to_string(),
        mount_point: block.leaf("Mount Point").map(str::to_string),
        file_system: block.leaf("File System").map(str::to_string),
        total_bytes,
        available_bytes,
        media_type: media_type(drive_leaf("Medium Type").as_deref(), protocol.as_deref()),
        device_name: drive_leaf("Device Name"),
        smart_status: drive_leaf("S.M.A.R.T. Status"),
        internal: drive.and_then(|d| d.leaf("Internal")).and_then(parse_flag),
        protocol,
    }
}

fn media_type(medium: Option<&str>, protocol: Option<&str>) -> MediaType {
    let nvme_protocol = protocol.is_some_and(|p| {
        let p = p.to_ascii_lowercase();
        p.contains("nvme") || p.contains("pci") || p.contains("apple fabric")
    });
    match medium.map(str::to_ascii_lowercase).as_deref() {
        Some("ssd") if nvme_protocol => MediaType::Nvme,
        Some("ssd") => MediaType::Ssd,
        Some("rotational") | Some("hdd") => MediaType::Hdd,
        _ if protocol.is_some_and(|p| p.eq_ignore_ascii_case("nvme")) => MediaType::Nvme,
        _ => MediaType::Unknown,
    }
}
