//! Cowrie log file discovery and loading.
//!
//! Reads newline-delimited JSON event files from the honeypot's log
//! directory and converts them into generic [`serde_json::Value`] records
//! for downstream processing.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use triage_core::{Result, TriageError};

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.json` files directly inside `log_dir` (non-recursive),
/// sorted by path.
///
/// File enumeration order is not stable across filesystems, so the sort
/// keeps the record stream (and everything derived from it) reproducible.
pub fn find_json_files(log_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(log_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load every parseable JSON line from every `.json` file under `log_dir`.
///
/// Lines that fail to parse are skipped with a warning naming the file;
/// this is the pipeline's only recovery behavior. A missing directory or
/// an unreadable file is fatal.
pub fn load_log_records(log_dir: &Path) -> Result<Vec<serde_json::Value>> {
    if !log_dir.is_dir() {
        return Err(TriageError::LogDirNotFound(log_dir.to_path_buf()));
    }

    let log_files = find_json_files(log_dir);
    if log_files.is_empty() {
        warn!("No .json log files found in {}", log_dir.display());
        return Ok(Vec::new());
    }

    let mut records: Vec<serde_json::Value> = Vec::new();
    for file_path in &log_files {
        read_single_file(file_path, &mut records)?;
    }

    debug!(
        "Loaded {} records from {} files",
        records.len(),
        log_files.len()
    );

    Ok(records)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Append every parseable line of one log file to `records`.
fn read_single_file(file_path: &Path, records: &mut Vec<serde_json::Value>) -> Result<()> {
    let file = std::fs::File::open(file_path).map_err(|source| TriageError::FileRead {
        path: file_path.to_path_buf(),
        source,
    })?;

    let reader = std::io::BufReader::new(file);
    let mut lines_read = 0u64;
    let mut lines_skipped = 0u64;

    for line_result in reader.lines() {
        let line = line_result.map_err(|source| TriageError::FileRead {
            path: file_path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        lines_read += 1;
        match serde_json::from_str(trimmed) {
            Ok(value) => records.push(value),
            Err(_) => {
                lines_skipped += 1;
                warn!("Skipping invalid JSON line in {}", file_path.display());
            }
        }
    }

    debug!(
        "File {}: {} lines, {} skipped",
        file_path.display(),
        lines_read,
        lines_skipped,
    );

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
