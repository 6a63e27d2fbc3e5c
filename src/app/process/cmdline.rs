use crate::app::models::CommandLineBreakdown;

const LABEL_WIDTH: usize = 25;
// Narrow no-break space; survives proportional fonts and HTML collapsing
// better than plain spaces when the report ends up in a styled viewer.
const LABEL_PAD: char = '\u{202F}';
const UID_REDACTION: &str = "[long string omitted]";

/// Split a `/proc/<pid>/cmdline`-style token sequence into categorized
/// buckets. Flags are consumed pairwise with their value; a dangling final
/// flag gets an empty value.
pub fn parse_command_line(raw: &str) -> CommandLineBreakdown {
    let cleaned = raw.replace('\0', " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let mut breakdown = CommandLineBreakdown {
        command: tokens.first().copied().unwrap_or_default().to_string(),
        ..CommandLineBreakdown::default()
    };

    let mut index = 1;
    while index < tokens.len() {
        let flag = tokens[index];
        let value = tokens.get(index + 1).copied().unwrap_or_default();
        if flag.starts_with("--si-") {
            breakdown.server_info.push(format!("{flag} {value}"));
        } else if flag.starts_with("--dl-") {
            breakdown.download_info.push(format!("{flag} {value}"));
        } else if flag.starts_with("--") {
            if flag == "--uid" {
                // Opaque identifier; never echo the real value.
                breakdown
                    .additional_settings
                    .push(format!("{flag} {UID_REDACTION}"));
            } else {
                breakdown.additional_settings.push(format!("{flag} {value}"));
            }
        } else {
            breakdown.arguments.push(format!("{flag} {value}"));
        }
        index += 2;
    }

    breakdown
}

fn pad_label(label: &str) -> String {
    let mut padded = label.to_string();
    while padded.chars().count() < LABEL_WIDTH {
        padded.push(LABEL_PAD);
    }
    padded
}

pub fn render_command_line(breakdown: &CommandLineBreakdown) -> String {
    let mut out = String::new();
    out.push_str(&pad_label("Command:"));
    out.push_str(&breakdown.command);
    out.push('\n');

    out.push_str(&pad_label("Arguments:"));
    out.push_str(&format!("[ {} ]\n", breakdown.arguments.join(" ")));

    if !breakdown.server_info.is_empty() {
        out.push_str(&pad_label("Server Info:"));
        out.push_str(&format!("[ {} ]\n", breakdown.server_info.join(" ")));
    }
    if !breakdown.download_info.is_empty() {
        out.push_str(&pad_label("Download Info:"));
        out.push_str(&format!("[ {} ]\n", breakdown.download_info.join(" ")));
    }
    if !breakdown.additional_settings.is_empty() {
        out.push('\n');
        out.push_str("Additional Settings:\n");
        for entry in &breakdown.additional_settings {
            out.push_str("  ");
            out.push_str(entry);
            out.push('\n');
        }
    }
    out
}

pub fn format_command_line(raw: &str) -> String {
    render_command_line(&parse_command_line(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_by_flag_prefix() {
        let breakdown = parse_command_line(
            "/data/local/libss-local.so --si-host 1.2.3.4 --si-port 443 --dl-rate 4096 --uid abcdef123 pos val",
        );
        assert_eq!(breakdown.command, "/data/local/libss-local.so");
        assert_eq!(
            breakdown.server_info,
            vec!["--si-host 1.2.3.4", "--si-port 443"]
        );
        assert_eq!(breakdown.download_info, vec!["--dl-rate 4096"]);
        assert_eq!(
            breakdown.additional_settings,
            vec!["--uid [long string omitted]"]
        );
        assert_eq!(breakdown.arguments, vec!["pos val"]);
    }

    #[test]
    fn splits_on_null_bytes() {
        let breakdown = parse_command_line("/bin/helper\0--si-host\x001.2.3.4\0");
        assert_eq!(breakdown.command, "/bin/helper");
        assert_eq!(breakdown.server_info, vec!["--si-host 1.2.3.4"]);
    }

    #[test]
    fn uid_value_never_leaks() {
        let breakdown = parse_command_line("/bin/helper --uid super-secret-identifier");
        assert_eq!(
            breakdown.additional_settings,
            vec!["--uid [long string omitted]"]
        );
        assert!(!render_command_line(&breakdown).contains("super-secret-identifier"));
    }

    #[test]
    fn dangling_flag_gets_empty_value() {
        let breakdown = parse_command_line("/bin/helper --dl-rate");
        assert_eq!(breakdown.download_info, vec!["--dl-rate "]);
    }

    #[test]
    fn empty_input_yields_empty_command() {
        let breakdown = parse_command_line("");
        assert_eq!(breakdown.command, "");
        assert!(breakdown.arguments.is_empty());
    }

    #[test]
    fn labels_are_padded_to_fixed_width() {
        let rendered = format_command_line("/bin/helper");
        let first_line = rendered.lines().next().unwrap_or_default();
        assert!(first_line.starts_with("Command:"));
        let label: String = first_line
            .chars()
            .take_while(|&c| c != '/')
            .collect();
        assert_eq!(label.chars().count(), 25);
        assert!(label.contains('\u{202F}'));
    }

    #[test]
    fn arguments_line_is_emitted_even_when_empty() {
        let rendered = format_command_line("/bin/helper");
        assert!(rendered.contains("[  ]"));
        assert!(!rendered.contains("Server Info:"));
        assert!(!rendered.contains("Download Info:"));
        assert!(!rendered.contains("Additional Settings:"));
    }

    #[test]
    fn additional_settings_render_after_blank_line() {
        let rendered = format_command_line("/bin/helper --verbose yes");
        assert!(rendered.contains("\n\nAdditional Settings:\n  --verbose yes\n"));
    }
}
