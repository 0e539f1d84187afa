use super::fields::{generated_text, section_views};
use crate::data::Report;

pub(super) fn render(report: &Report) -> String {
    let mut out = vec![
        "# Mac System Information".to_string(),
        String::new(),
        format!("*Generated on {}*", generated_text(report)),
    ];

    for view in section_views(report) {
        out.push(String::new());
        out.push(format!("## {}", view.section.title()));
        out.push(String::new());

        let Some(groups) = &view.groups else {
            out.push(format!("*{}*", view.unavailable_text()));
            continue;
        };
        for (i, group) in groups.iter().enumerate() {
            if let Some(heading) = &group.heading {
                if i > 0 {
                    out.push(String::new());
                }
                out.push(format!("### {}", heading));
            }
            out.extend(
                group
                    .fields
                    .iter()
                    .map(|f| format!("- **{}:** {}", f.label, f.display_value())),
            );
        }
    }
    out.join("\n")
}
