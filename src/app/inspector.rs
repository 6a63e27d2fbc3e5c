use std::time::Duration;

use tracing::{info, warn};

use crate::app::activity::{extract_activity_report, render_activity_report};
use crate::app::adb::parse::{parse_adb_devices, pick_active_device};
use crate::app::adb::runner::{run_adb, run_adb_shell};
use crate::app::error::AppError;
use crate::app::models::{ActivitySnapshot, AdbInfo};
use crate::app::process::format_process_report;

const NO_DEVICE: &str = "No device found";

/// Ties the adb collaborators to the pure report transforms. All parsing
/// stays best-effort; only command execution itself can fail.
pub struct Inspector {
    program: String,
    serial: Option<String>,
    timeout: Duration,
}

impl Inspector {
    pub fn new(program: String, serial: Option<String>, timeout: Duration) -> Self {
        Self {
            program,
            serial,
            timeout,
        }
    }

    pub fn adb_path(&self) -> &str {
        &self.program
    }

    fn shell_stdout(&self, shell_args: &[&str], trace_id: &str) -> Result<String, AppError> {
        let output = run_adb_shell(
            &self.program,
            self.serial.as_deref(),
            shell_args,
            self.timeout,
            trace_id,
        )?;
        if output.exit_code != Some(0) {
            warn!(
                exit_code = ?output.exit_code,
                stderr = %output.stderr.trim(),
                trace_id,
                "adb shell command exited non-zero"
            );
        }
        Ok(output.stdout)
    }

    fn resolve_device(&self, trace_id: &str) -> String {
        if let Some(serial) = &self.serial {
            return serial.clone();
        }
        let listed = run_adb(&self.program, None, &["devices", "-l"], self.timeout, trace_id)
            .map(|output| output.stdout)
            .unwrap_or_default();
        let devices = parse_adb_devices(&listed);
        pick_active_device(&devices)
            .map(|device| device.serial.clone())
            .unwrap_or_else(|| NO_DEVICE.to_string())
    }

    /// Structured capture of the foreground activity stack.
    pub fn activity_snapshot(&self, trace_id: &str) -> Result<ActivitySnapshot, AppError> {
        let device = self.resolve_device(trace_id);
        let dump = self.shell_stdout(&["dumpsys", "activity", "top"], trace_id)?;
        let report = extract_activity_report(&dump);
        info!(device = %device, tasks = report.tasks.len(), trace_id, "captured activity report");
        Ok(ActivitySnapshot {
            device,
            adb_path: self.program.clone(),
            report,
        })
    }

    /// Rendered activity report, prefixed with the device header.
    pub fn activity_report(&self, trace_id: &str) -> Result<String, AppError> {
        let snapshot = self.activity_snapshot(trace_id)?;
        Ok(format!(
            "Device: {}\nADB Path: {}\n\n{}",
            snapshot.device,
            snapshot.adb_path,
            render_activity_report(&snapshot.report)
        ))
    }

    /// Rendered command-line report for every running process whose `ps`
    /// line mentions `process_name`.
    pub fn process_report(&self, process_name: &str, trace_id: &str) -> Result<String, AppError> {
        let ps_output = self.shell_stdout(&["ps", "-A"], trace_id)?;
        let filtered: String = ps_output
            .lines()
            .filter(|line| line.contains(process_name))
            .collect::<Vec<_>>()
            .join("\n");
        info!(
            process = process_name,
            matches = filtered.lines().count(),
            trace_id,
            "captured process list"
        );
        Ok(format_process_report(&filtered, |pid| {
            let path = format!("/proc/{pid}/cmdline");
            match self.shell_stdout(&["cat", &path], trace_id) {
                Ok(stdout) => stdout,
                // Surfaced as report text, never as a failure of the whole
                // report (remaining processes still get their block).
                Err(err) => format!("Error executing command: cat {path}\n{err}"),
            }
        }))
    }

    pub fn check_adb(&self, trace_id: &str) -> AdbInfo {
        match run_adb(&self.program, None, &["version"], self.timeout, trace_id) {
            Ok(output) if output.exit_code == Some(0) => AdbInfo {
                available: true,
                version_output: output.stdout.trim().to_string(),
                command_path: self.program.clone(),
                error: None,
            },
            Ok(output) => AdbInfo {
                available: false,
                version_output: output.stdout.trim().to_string(),
                command_path: self.program.clone(),
                error: Some(output.stderr.trim().to_string()),
            },
            Err(err) => AdbInfo {
                available: false,
                version_output: String::new(),
                command_path: self.program.clone(),
                error: Some(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_serial_skips_device_listing() {
        let inspector = Inspector::new(
            "/nonexistent/adb".to_string(),
            Some("ABC123".to_string()),
            Duration::from_secs(1),
        );
        assert_eq!(inspector.resolve_device("test-trace"), "ABC123");
    }

    #[test]
    fn unreachable_adb_reports_no_device() {
        let inspector =
            Inspector::new("/nonexistent/adb".to_string(), None, Duration::from_secs(1));
        assert_eq!(inspector.resolve_device("test-trace"), NO_DEVICE);
    }

    #[test]
    fn check_adb_reports_unavailable_program() {
        let inspector =
            Inspector::new("/nonexistent/adb".to_string(), None, Duration::from_secs(1));
        let info = inspector.check_adb("test-trace");
        assert!(!info.available);
        assert_eq!(info.command_path, "/nonexistent/adb");
        assert!(info.error.is_some());
    }
}
