use std::time::Duration;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use droidlens::app::adb::locator::{resolve_adb_program, validate_adb_program};
use droidlens::app::config::{load_config, save_config, AppConfig};
use droidlens::app::error::AppError;
use droidlens::app::inspector::Inspector;
use droidlens::app::logging::init_logging;

#[derive(Parser)]
#[command(
    name = "droidlens",
    version,
    about = "Inspect the foreground activity stack and helper-process command lines of a connected Android device"
)]
struct Cli {
    /// Path to the adb executable (overrides config and auto-discovery)
    #[arg(long, global = true)]
    adb: Option<String>,

    /// Target device serial (defaults to the last connected device)
    #[arg(long, global = true)]
    serial: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the task/activity/fragment tree of the foreground app
    Activity {
        /// Emit the structured report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show a categorized command-line report for a helper process
    Process {
        /// Process name to match in the device process list
        #[arg(long)]
        name: Option<String>,
    },
    /// Verify that adb is available and print its version
    Check,
    /// Show or update the persisted configuration
    Config {
        /// Persist a new adb path (empty string re-enables auto-discovery)
        #[arg(long)]
        adb_path: Option<String>,
        /// Persist a new default helper process name
        #[arg(long)]
        process_name: Option<String>,
        /// Persist a new adb command timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let trace_id = Uuid::new_v4().to_string();
    match run(cli, &trace_id) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("droidlens: {err} [trace_id={}]", err.trace_id);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli, trace_id: &str) -> Result<String, AppError> {
    let config = load_config()?;
    match cli.command {
        Commands::Config {
            adb_path,
            process_name,
            timeout_secs,
        } => show_or_update_config(config, adb_path, process_name, timeout_secs, trace_id),
        Commands::Activity { json } => {
            let inspector = build_inspector(&config, cli.adb, cli.serial, trace_id)?;
            if json {
                let snapshot = inspector.activity_snapshot(trace_id)?;
                serde_json::to_string_pretty(&snapshot).map_err(|err| {
                    AppError::system(format!("Failed to render report: {err}"), trace_id)
                })
            } else {
                inspector.activity_report(trace_id)
            }
        }
        Commands::Process { name } => {
            let process_name = name.unwrap_or_else(|| config.process.helper_process_name.clone());
            let inspector = build_inspector(&config, cli.adb, cli.serial, trace_id)?;
            inspector.process_report(&process_name, trace_id)
        }
        Commands::Check => {
            let inspector = build_inspector(&config, cli.adb, cli.serial, trace_id)?;
            let info = inspector.check_adb(trace_id);
            if info.available {
                Ok(format!(
                    "adb available at {}\n{}",
                    info.command_path, info.version_output
                ))
            } else {
                Err(AppError::dependency(
                    format!(
                        "adb not available at {}: {}",
                        info.command_path,
                        info.error.unwrap_or_default()
                    ),
                    trace_id,
                ))
            }
        }
    }
}

fn build_inspector(
    config: &AppConfig,
    adb_override: Option<String>,
    serial: Option<String>,
    trace_id: &str,
) -> Result<Inspector, AppError> {
    let program = match adb_override {
        Some(path) => {
            let program = resolve_adb_program(&path);
            validate_adb_program(&program)
                .map_err(|message| AppError::validation(message, trace_id))?;
            program
        }
        None => resolve_adb_program(&config.adb.command_path),
    };
    Ok(Inspector::new(
        program,
        serial,
        Duration::from_secs(config.adb.command_timeout_secs),
    ))
}

fn show_or_update_config(
    mut config: AppConfig,
    adb_path: Option<String>,
    process_name: Option<String>,
    timeout_secs: Option<u64>,
    trace_id: &str,
) -> Result<String, AppError> {
    let changed = adb_path.is_some() || process_name.is_some() || timeout_secs.is_some();
    if let Some(path) = adb_path {
        config.adb.command_path = path;
    }
    if let Some(name) = process_name {
        config.process.helper_process_name = name;
    }
    if let Some(secs) = timeout_secs {
        config.adb.command_timeout_secs = secs;
    }
    if changed {
        save_config(&config)?;
    }
    serde_json::to_string_pretty(&config)
        .map_err(|err| AppError::system(format!("Failed to render config: {err}"), trace_id))
}
