//! JSON and YAML output: a direct serde dump of the report.

use crate::data::Report;
use crate::error::Result;

pub(super) fn to_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub(super) fn to_yaml(report: &Report) -> Result<String> {
    Ok(serde_yaml::to_string(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Section, Vram};

    #[test]
    fn absent_sections_are_null() {
        let json = to_json(&Report::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        for section in Section::ALL {
            assert!(value[section.name()].is_null(), "{section} should be null");
        }
        assert_eq!(value["sections"][0], "hardware");
    }

    #[test]
    fn yaml_parses_back() {
        let yaml = to_yaml(&Report::default()).unwrap();
        let report: Report = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(report, Report::default());
    }

    #[test]
    fn vram_is_tagged() {
        let json = serde_json::to_string(&Vram::Dedicated { bytes: 1024 }).unwrap();
        assert_eq!(json, r#"{"kind":"dedicated","bytes":1024}"#);
        assert_eq!(serde_json::to_string(&Vram::Shared).unwrap(), r#"{"kind":"shared"}"#);
    }
}
