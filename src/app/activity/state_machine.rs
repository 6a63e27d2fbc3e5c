use regex::Regex;

use crate::app::models::{ActivityEntry, TaskEntry};

// Framework-internal fragments that only add noise to the report.
const SKIPPED_FRAGMENT_SUFFIXES: [&str; 3] =
    ["DispatchFragment", "InjectFragment", "ReportFragment"];

/// Context tracked while inside a `TASK ...` block of the dump.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskContext {
    pub task_id: String,
    pub activity_name: Option<String>,
    pub fragments: Vec<String>,
    pub capturing_fragments: bool,
    /// Latched once `View Hierarchy:` is seen; fragment capture stays
    /// closed for the rest of the task even if `Added Fragments:` reappears.
    pub hierarchy_seen: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserState {
    Idle,
    InTask(TaskContext),
}

pub struct ActivityDumpParser {
    re_fragment: Regex,
}

impl Default for ActivityDumpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityDumpParser {
    pub fn new() -> Self {
        Self {
            re_fragment: Regex::new(r"#\d+: ([\w.]+)\{").unwrap(),
        }
    }

    /// Feed one line of the dump. Returns the next state, plus the task
    /// entry that just closed when the line opens a new `TASK` block.
    /// Unrecognized lines leave the state untouched.
    pub fn step(&self, state: ParserState, line: &str) -> (ParserState, Option<TaskEntry>) {
        let trimmed = line.trim();

        if trimmed.starts_with("TASK") {
            let flushed = Self::finish(state);
            let task_id = trimmed
                .split_whitespace()
                .nth(1)
                .unwrap_or_default()
                .to_string();
            let next = ParserState::InTask(TaskContext {
                task_id,
                ..TaskContext::default()
            });
            return (next, flushed);
        }

        let ParserState::InTask(mut context) = state else {
            // Nothing outside a TASK block contributes to the report.
            return (ParserState::Idle, None);
        };

        if trimmed.starts_with("ACTIVITY") {
            if let Some(name) = trimmed.split_whitespace().nth(1) {
                // Only the most recent activity is kept. Fragments captured
                // under a superseded activity are left in place on purpose
                // and end up attributed to the final one.
                context.activity_name = Some(name.to_string());
            }
            context.capturing_fragments = false;
        } else if trimmed == "Added Fragments:" {
            if !context.hierarchy_seen {
                context.capturing_fragments = true;
            }
        } else if context.capturing_fragments && trimmed.starts_with('#') {
            if let Some(name) = self.extract_fragment_name(trimmed) {
                if !is_skipped_fragment(&name) {
                    context.fragments.push(name);
                }
            }
        } else if trimmed.starts_with("View Hierarchy:") {
            context.capturing_fragments = false;
            context.hierarchy_seen = true;
        }

        (ParserState::InTask(context), None)
    }

    /// Close out whatever task block is still open at end of input.
    pub fn finish(state: ParserState) -> Option<TaskEntry> {
        match state {
            ParserState::Idle => None,
            ParserState::InTask(context) => {
                if context.task_id.is_empty() {
                    return None;
                }
                let activity = context.activity_name.map(|name| ActivityEntry {
                    name,
                    fragments: context.fragments,
                });
                Some(TaskEntry {
                    task_id: context.task_id,
                    activity,
                })
            }
        }
    }

    fn extract_fragment_name(&self, line: &str) -> Option<String> {
        self.re_fragment
            .captures(line)
            .map(|caps| caps[1].to_string())
    }
}

fn is_skipped_fragment(name: &str) -> bool {
    SKIPPED_FRAGMENT_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}
