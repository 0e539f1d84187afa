use super::fields::{generated_text, section_views, SectionView};
use super::{RenderOptions, RESET};
use crate::data::Report;
use unicode_width::UnicodeWidthStr;

const RULE_WIDTH: usize = 40;

pub(super) fn render(report: &Report, options: &RenderOptions) -> String {
    let paint = |code: &str, text: &str| {
        if options.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    };

    let views = section_views(report);
    if views.is_empty() {
        return "No sections requested".to_string();
    }

    let mut lines = vec![format!("Generated on {}", generated_text(report))];
    for view in &views {
        lines.push(String::new());
        let title = view.section.title();
        lines.push(paint(&options.palette.title, title));
        lines.push("-".repeat(RULE_WIDTH.max(title.width())));
        render_section(view, options, &paint, &mut lines);
    }
    lines.join("\n")
}

fn render_section(
    view: &SectionView,
    options: &RenderOptions,
    paint: &dyn Fn(&str, &str) -> String,
    lines: &mut Vec<String>,
) {
    let Some(groups) = &view.groups else {
        lines.push(view.unavailable_text());
        return;
    };

    let key_width = groups
        .iter()
        .flat_map(|g| g.fields.iter())
        .map(|f| f.label.width())
        .max()
        .unwrap_or(0);

    for (i, group) in groups.iter().enumerate() {
        let indent = if let Some(heading) = &group.heading {
            if i > 0 {
                lines.push(String::new());
            }
            lines.push(paint(&options.palette.title, heading));
            "  "
        } else {
            ""
        };
        for field in &group.fields {
            // display width, not byte length
            let padding = " ".repeat(key_width - field.label.width());
            lines.push(format!(
                "{}{}{}{}{}",
                indent,
                paint(&options.palette.key, field.label),
                options.separator,
                padding,
                paint(&options.palette.value, field.display_value()),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AudioRecord, BatteryRecord, BatterySource, Section};
    use crate::display::UNKNOWN;
    use chrono::{TimeZone, Utc};

    #[test]
    fn keys_are_aligned_and_unknowns_shown() {
        let mut report = Report::new(&[Section::Battery]);
        let mut battery = BatteryRecord::empty(BatterySource::Pmset);
        battery.charge_percent = Some(85);
        report.battery = Some(battery);

        let out = render(&report, &RenderOptions::default());
        assert!(out.contains("Current Charge:       85%"), "{out}");
        assert!(out.contains(&format!("Cycle Count:          {}", UNKNOWN)), "{out}");
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn collection_time_and_sources_are_shown() {
        let mut report = Report::new(&[Section::Battery]);
        report.collected_at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).single();
        report.battery = Some(BatteryRecord::empty(BatterySource::Pmset));

        let out = render(&report, &RenderOptions::default());
        assert!(out.starts_with("Generated on 2024-03-01 09:30:00 UTC\n"), "{out}");
        assert!(out.contains("Source:               pmset"), "{out}");
    }

    #[test]
    fn missing_battery_placeholder() {
        let out = render(&Report::new(&[Section::Battery]), &RenderOptions::default());
        assert!(out.contains("No battery information available"));
    }

    #[test]
    fn colour_codes_only_when_enabled() {
        let mut report = Report::new(&[Section::Audio]);
        report.audio = Some(AudioRecord {
            devices: vec!["Speakers".to_string()],
        });
        let options = RenderOptions {
            color: true,
            ..RenderOptions::default()
        };
        let out = render(&report, &options);
        assert!(out.contains(RESET));
        assert!(out.contains("Speakers"));
    }
}
