use crate::app::models::ActivityReport;

/// Plain-text rendering of an [`ActivityReport`]. Hosts that want styled
/// output should render the structured report themselves instead.
pub fn render_activity_report(report: &ActivityReport) -> String {
    let mut out = String::new();
    for task in &report.tasks {
        out.push_str("Task: ");
        out.push_str(&task.task_id);
        out.push('\n');
        if let Some(activity) = &task.activity {
            out.push_str("  Activity: ");
            out.push_str(&activity.name);
            out.push('\n');
            if !activity.fragments.is_empty() {
                out.push_str("    Fragments:\n");
                for fragment in &activity.fragments {
                    out.push_str("      - ");
                    out.push_str(fragment);
                    out.push('\n');
                }
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{ActivityEntry, TaskEntry};

    #[test]
    fn renders_task_without_activity_as_single_line_block() {
        let report = ActivityReport {
            tasks: vec![TaskEntry {
                task_id: "7".to_string(),
                activity: None,
            }],
        };
        assert_eq!(render_activity_report(&report), "Task: 7\n\n");
    }

    #[test]
    fn renders_nested_fragments_in_capture_order() {
        let report = ActivityReport {
            tasks: vec![TaskEntry {
                task_id: "1".to_string(),
                activity: Some(ActivityEntry {
                    name: "com.a.Main".to_string(),
                    fragments: vec![
                        "com.a.ListFragment".to_string(),
                        "com.a.DetailFragment".to_string(),
                    ],
                }),
            }],
        };
        assert_eq!(
            render_activity_report(&report),
            "Task: 1\n  Activity: com.a.Main\n    Fragments:\n      - com.a.ListFragment\n      - com.a.DetailFragment\n\n"
        );
    }

    #[test]
    fn skips_fragments_header_when_list_is_empty() {
        let report = ActivityReport {
            tasks: vec![TaskEntry {
                task_id: "1".to_string(),
                activity: Some(ActivityEntry {
                    name: "com.a.Main".to_string(),
                    fragments: vec![],
                }),
            }],
        };
        assert_eq!(
            render_activity_report(&report),
            "Task: 1\n  Activity: com.a.Main\n\n"
        );
    }
}
