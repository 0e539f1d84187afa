//! Graphics adapter and display collection

use super::{record_failure, system_profiler};
use crate::data::{GraphicsAdapter, GraphicsRecord, Hint, Section, Vram};
use crate::profiler::{ProfilerBlock, ProfilerValue};
use crate::utils::command::CommandRunner;
use crate::utils::parsing::{parse_flag, parse_leading_count, parse_size, UnitBase};

pub fn collect_graphics(runner: &dyn CommandRunner, hints: &mut Vec<Hint>) -> Option<GraphicsRecord> {
    match system_profiler(runner, "SPDisplaysDataType") {
        Ok(tree) => Some(parse_graphics(&tree)),
        Err(err) => {
            record_failure(hints, Section::Graphics, "system_profiler SPDisplaysDataType", &err);
            hints.push(Hint::Unavailable {
                section: Section::Graphics,
                reason: "system_profiler SPDisplaysDataType failed".to_string(),
            });
            None
        }
    }
}

/// Parse `system_profiler SPDisplaysDataType`.
pub fn parse_graphics(tree: &ProfilerBlock) -> GraphicsRecord {
    let root = tree.block("Graphics/Displays").unwrap_or(tree);
    let mut adapters = Vec::new();
    gather_adapters(root, &mut adapters);
    GraphicsRecord { adapters }
}

fn gather_adapters(block: &ProfilerBlock, adapters: &mut Vec<GraphicsAdapter>) {
    for (name, child) in block.blocks() {
        if child.leaf("Chipset Model").is_some() || child.leaf("Vendor").is_some() {
            adapters.push(parse_adapter(name, child));
        } else if name != "Displays" {
            gather_adapters(child, adapters);
        }
    }
}

fn parse_adapter(name: &str, block: &ProfilerBlock) -> GraphicsAdapter {
    let chipset = block.leaf("Chipset Model").unwrap_or(name);
    let vendor = block.leaf("Vendor").map(|v| {
        v.split_once(" (")
            .map(|(head, _)| head)
            .unwrap_or(v)
            .trim()
            .to_string()
    });

    let vram = block
        .entries()
        .find_map(|(key, value)| match value {
            ProfilerValue::Leaf(text) if key.starts_with("VRAM") => {
                Some((key, text.as_str()))
            }
            _ => None,
        })
        .and_then(|(key, text)| {
            if key.contains("Dynamic") || key.contains("Shared") {
                Some(Vram::Shared)
            } else {
                parse_size(text, UnitBase::Binary).map(|bytes| Vram::Dedicated { bytes })
            }
        })
        .or_else(|| chipset.starts_with("Apple").then_some(Vram::Shared));

    let displays = block.block("Displays");
    let display_count = displays.map_or(0, |d| d.blocks().count() as u32);
    let main_resolution = displays.and_then(|d| {
        d.blocks()
            .map(|(_, display)| display)
            .find(|display| display.leaf("Main Display").and_then(parse_flag) == Some(true))
            .or_else(|| d.blocks().next().map(|(_, display)| display))
            .and_then(|display| display.leaf_any(&["Resolution", "UI Looks like"]))
            .map(str::to_string)
    });

    GraphicsAdapter {
        name: chipset.to_string(),
        vendor,
        vram,
        cores: block.leaf("Total Number of Cores").and_then(parse_leading_count),
        metal_support: block
            .leaf_any(&["Metal Support", "Metal Family", "Metal"])
            .map(str::to_string),
        display_count,
        main_resolution,
    }
}
