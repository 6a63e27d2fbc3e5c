use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::app::error::AppError;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

// Drain a pipe on its own thread; a chatty child can otherwise block once
// the pipe buffer fills and make a fast command look like a timeout.
fn drain_pipe<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buffer = Vec::<u8>::new();
        let mut chunk = [0u8; 4096];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(count) => buffer.extend_from_slice(&chunk[..count]),
                Err(_) => break,
            }
        }
        buffer
    })
}

fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
    trace_id: &str,
) -> Result<Option<i32>, AppError> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status.code()),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AppError::system("Command timed out", trace_id));
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(err) => {
                return Err(AppError::system(
                    format!("Failed to poll command: {err}"),
                    trace_id,
                ))
            }
        }
    }
}

pub fn run_command_with_timeout(
    program: &str,
    args: &[String],
    timeout: Duration,
    trace_id: &str,
) -> Result<CommandOutput, AppError> {
    let mut child = Command::new(program)
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| AppError::system(format!("Failed to spawn command: {err}"), trace_id))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AppError::system("Failed to capture stdout", trace_id))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| AppError::system("Failed to capture stderr", trace_id))?;

    let stdout_handle = drain_pipe(stdout);
    let stderr_handle = drain_pipe(stderr);

    let waited = wait_with_timeout(&mut child, timeout, trace_id);
    let stdout_bytes = stdout_handle.join().unwrap_or_default();
    let stderr_bytes = stderr_handle.join().unwrap_or_default();
    let exit_code = waited?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&stdout_bytes).to_string(),
        stderr: String::from_utf8_lossy(&stderr_bytes).to_string(),
        exit_code,
    })
}

/// Run `adb [-s serial] <args>` with the given timeout.
pub fn run_adb(
    program: &str,
    serial: Option<&str>,
    args: &[&str],
    timeout: Duration,
    trace_id: &str,
) -> Result<CommandOutput, AppError> {
    let mut full_args = Vec::new();
    if let Some(serial) = serial {
        full_args.push("-s".to_string());
        full_args.push(serial.to_string());
    }
    full_args.extend(args.iter().map(|arg| arg.to_string()));
    run_command_with_timeout(program, &full_args, timeout, trace_id)
}

/// Run `adb [-s serial] shell <args>`.
pub fn run_adb_shell(
    program: &str,
    serial: Option<&str>,
    shell_args: &[&str],
    timeout: Duration,
    trace_id: &str,
) -> Result<CommandOutput, AppError> {
    let mut args = vec!["shell"];
    args.extend_from_slice(shell_args);
    run_adb(program, serial, &args, timeout, trace_id)
}
