//! Audio device collection

use super::{record_failure, system_profiler};
use crate::data::{AudioRecord, Hint, Section};
use crate::profiler::ProfilerBlock;
use crate::utils::command::CommandRunner;

pub fn collect_audio(runner: &dyn CommandRunner, hints: &mut Vec<Hint>) -> Option<AudioRecord> {
    match system_profiler(runner, "SPAudioDataType") {
        Ok(tree) => Some(parse_audio(&tree)),
        Err(err) => {
            record_failure(hints, Section::Audio, "system_profiler SPAudioDataType", &err);
            hints.push(Hint::Unavailable {
                section: Section::Audio,
                reason: "system_profiler SPAudioDataType failed".to_string(),
            });
            None
        }
    }
}

/// Device names are the block headers under `Devices:`.
pub fn parse_audio(tree: &ProfilerBlock) -> AudioRecord {
    let devices = tree
        .find_block("Devices")
        .unwrap_or_else(|| tree.block("Audio").unwrap_or(tree))
        .blocks()
        .map(|(name, _)| name.to_string())
        .collect();
    AudioRecord { devices }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_names_in_order() {
        let text = "Audio:

    Devices:

        MacBook Pro Microphone:

          Default Input Device: Yes
          Input Channels: 1

        MacBook Pro Speakers:

          Default Output Device: Yes
          Output Channels: 2
";
        let record = parse_audio(&ProfilerBlock::parse(text));
        assert_eq!(record.devices, vec!["MacBook Pro Microphone", "MacBook Pro Speakers"]);
    }

    #[test]
    fn empty_output_has_no_devices() {
        assert!(parse_audio(&ProfilerBlock::parse("Audio:\n")).devices.is_empty());
    }
}
