use std::path::Path;

pub fn normalize_command_path(value: &str) -> String {
    let trimmed = value.trim();
    if let Some(inner) = trimmed
        .strip_prefix('"')
        .and_then(|candidate| candidate.strip_suffix('"'))
    {
        return inner.trim().to_string();
    }
    if let Some(inner) = trimmed
        .strip_prefix('\'')
        .and_then(|candidate| candidate.strip_suffix('\''))
    {
        return inner.trim().to_string();
    }
    trimmed.to_string()
}

/// Well-known install locations checked before falling back to PATH lookup.
pub fn candidate_adb_paths() -> Vec<String> {
    let mut candidates = Vec::new();
    if let Ok(home) = std::env::var("HOME") {
        if !home.trim().is_empty() {
            candidates.push(format!(
                "{}/Library/Android/sdk/platform-tools/adb",
                home.trim_end_matches('/')
            ));
        }
    }
    candidates.push("/usr/local/bin/adb".to_string());
    candidates
}

pub fn find_adb_program() -> String {
    for candidate in candidate_adb_paths() {
        if Path::new(&candidate).exists() {
            return candidate;
        }
    }
    "adb".to_string()
}

/// Resolve the adb program to invoke: an explicitly configured path wins,
/// otherwise scan the candidate locations.
pub fn resolve_adb_program(configured: &str) -> String {
    let normalized = normalize_command_path(configured);
    if normalized.is_empty() {
        find_adb_program()
    } else {
        normalized
    }
}

pub fn validate_adb_program(program: &str) -> Result<(), String> {
    if program.trim().is_empty() {
        return Err("ADB command is empty".to_string());
    }
    if program == "adb" {
        return Ok(());
    }
    let path = Path::new(program);
    if path.is_dir() {
        return Err("ADB path must point to an executable file".to_string());
    }
    if !path.exists() {
        return Err("ADB executable not found at the configured path".to_string());
    }
    Ok(())
}
