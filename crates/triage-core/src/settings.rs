use clap::Parser;
use std::path::PathBuf;

/// Fixed output file names, written into the configured output directory.
pub const ANOMALIES_FILE: &str = "anomalies.csv";
pub const MATRIX_FILE: &str = "levenshtein_distance_matrix.csv";
pub const DENDROGRAM_FILE: &str = "dendrogram.png";

/// Default baseline of known-benign commands.
pub const DEFAULT_BASELINE: &str = "ls,pwd,cat,whoami,cd,echo,uname,touch";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Offline triage of Cowrie honeypot session logs
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cowrie-triage",
    about = "Offline triage of Cowrie honeypot session logs",
    version
)]
pub struct Settings {
    /// Directory containing Cowrie JSON log files (non-recursive)
    #[arg(long, default_value = "/home/server/cowrie/var/log/cowrie")]
    pub log_dir: PathBuf,

    /// Comma-separated baseline of known-benign commands
    #[arg(long, value_delimiter = ',', default_value = DEFAULT_BASELINE)]
    pub baseline: Vec<String>,

    /// Anomaly distance threshold; commands whose minimum distance to the
    /// baseline exceeds this are flagged
    #[arg(long, default_value_t = 3)]
    pub threshold: usize,

    /// Linkage method for hierarchical clustering
    #[arg(long, default_value = "average", value_parser = ["average", "single", "complete", "weighted"])]
    pub linkage: String,

    /// Directory where the report files are written
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Path of the anomaly report file.
    pub fn anomalies_path(&self) -> PathBuf {
        self.output_dir.join(ANOMALIES_FILE)
    }

    /// Path of the distance-matrix report file.
    pub fn matrix_path(&self) -> PathBuf {
        self.output_dir.join(MATRIX_FILE)
    }

    /// Path of the rendered dendrogram image.
    pub fn dendrogram_path(&self) -> PathBuf {
        self.output_dir.join(DENDROGRAM_FILE)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
