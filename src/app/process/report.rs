use crate::app::models::ProcessEntry;
use crate::app::process::cmdline::format_command_line;

const RULE_WIDTH: usize = 100;

/// PID column of a `ps`-style line: the second whitespace-delimited token.
pub fn extract_pid(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}

/// Resolve each matched process line to its raw command line via the
/// supplied per-pid lookup. Lines without a PID column are skipped.
pub fn collect_process_entries<F>(raw_ps: &str, lookup: F) -> Vec<ProcessEntry>
where
    F: Fn(&str) -> String,
{
    raw_ps
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(extract_pid)
        .map(|pid| ProcessEntry {
            pid: pid.to_string(),
            raw_command_line: lookup(pid),
        })
        .collect()
}

/// Assemble the full process report: the filtered `ps` lines verbatim,
/// then one formatted command-line block per process, separated by a rule.
pub fn format_process_report<F>(raw_ps: &str, lookup: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut out = String::new();
    for line in raw_ps.lines().filter(|line| !line.trim().is_empty()) {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');

    let entries = collect_process_entries(raw_ps, lookup);
    for (index, entry) in entries.iter().enumerate() {
        if index > 0 {
            out.push_str(&"-".repeat(RULE_WIDTH));
            out.push('\n');
        }
        out.push_str("PID: ");
        out.push_str(&entry.pid);
        out.push('\n');
        out.push_str(&format_command_line(&entry.raw_command_line));
        out.push('\n');
    }

    out.trim_end().to_string()
}
