pub mod cmdline;
pub mod report;

pub use cmdline::{format_command_line, parse_command_line, render_command_line};
pub use report::{collect_process_entries, format_process_report};
