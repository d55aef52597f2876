use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the triage pipeline.
///
/// The taxonomy separates recoverable parse problems (which the loader
/// handles internally by skipping the offending line) from fatal I/O,
/// rendering failures and degenerate input that the pipeline reports as
/// a defined condition rather than a crash.
#[derive(Error, Debug)]
pub enum TriageError {
    /// The configured log directory does not exist or is not a directory.
    #[error("Log directory not found: {0}")]
    LogDirNotFound(PathBuf),

    /// A log file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A linkage method string is not one of the recognised methods.
    #[error("Unknown linkage method: {0}")]
    UnknownLinkage(String),

    /// Input too small or empty for the requested stage (e.g. clustering
    /// fewer than two sessions).
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A report file could not be written.
    #[error("Failed to write report {path}: {source}")]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The dendrogram could not be rendered to disk.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the triage crates.
pub type Result<T> = std::result::Result<T, TriageError>;
