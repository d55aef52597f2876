//! The triage pipeline.
//!
//! One synchronous pass: load logs → extract session commands → flag
//! anomalies → write the anomaly report → build the distance matrix →
//! write the matrix report → cluster → render the dendrogram. Each stage
//! fully consumes its input and produces a new structure; any failure
//! aborts the run.

use tracing::{info, warn};
use triage_core::settings::Settings;
use triage_core::Result;
use triage_data::detector::detect_anomalies;
use triage_data::extractor::extract_session_commands;
use triage_data::matrix::build_distance_matrix;
use triage_data::reader::load_log_records;
use triage_report::cluster::cluster_sessions;
use triage_report::dendrogram::render_dendrogram;
use triage_report::report::{write_anomalies_csv, write_distance_matrix_csv};

/// Counters describing one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Log records successfully parsed.
    pub records: usize,
    /// Session-command pairs extracted.
    pub pairs: usize,
    /// Distinct sessions seen.
    pub sessions: usize,
    /// Anomalies flagged.
    pub anomalies: usize,
    /// Whether the dendrogram was rendered (false when fewer than two
    /// sessions were available to cluster).
    pub dendrogram_rendered: bool,
}

/// Run the full pipeline with the given settings.
///
/// Degenerate inputs are defined results, not crashes: with zero pairs
/// both CSV files are still written (headers only), and with fewer than
/// two sessions the dendrogram is skipped with a warning.
pub fn run(settings: &Settings) -> Result<PipelineSummary> {
    info!("Loading Cowrie logs from {}", settings.log_dir.display());
    let records = load_log_records(&settings.log_dir)?;

    let pairs = extract_session_commands(&records);
    info!("Extracted {} session-command pairs", pairs.len());

    info!("Detecting anomalies (threshold {})", settings.threshold);
    let anomalies = detect_anomalies(&pairs, &settings.baseline, settings.threshold);
    if anomalies.is_empty() {
        info!("No anomalies detected");
    } else {
        info!("Detected {} anomalies:", anomalies.len());
        for anomaly in &anomalies {
            info!(
                "  Session: {} | Command: {} | Distance: {}",
                anomaly.session, anomaly.command, anomaly.distance
            );
        }
    }
    write_anomalies_csv(&settings.anomalies_path(), &anomalies)?;

    info!("Calculating Levenshtein distance matrix");
    let matrix = build_distance_matrix(&pairs);
    write_distance_matrix_csv(&settings.matrix_path(), &matrix)?;

    let dendrogram_rendered = if matrix.len() >= 2 {
        info!("Generating dendrogram ({} linkage)", settings.linkage);
        let tree = cluster_sessions(&matrix, &settings.linkage)?;
        render_dendrogram(&tree, matrix.labels(), &settings.dendrogram_path())?;
        true
    } else {
        warn!(
            "Skipping dendrogram: {} session(s), need at least 2 to cluster",
            matrix.len()
        );
        false
    };

    Ok(PipelineSummary {
        records: records.len(),
        pairs: pairs.len(),
        sessions: matrix.len(),
        anomalies: anomalies.len(),
        dendrogram_rendered,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use tempfile::TempDir;
    use triage_core::TriageError;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_log(dir: &Path, name: &str, lines: &[&str]) {
        let path = dir.join(name);
        let mut file = std::fs::File::create(path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    fn command_line(session: &str, input: &str) -> String {
        serde_json::json!({
            "session": session,
            "eventid": "cowrie.command.input",
            "input": input,
        })
        .to_string()
    }

    fn settings_for(log_dir: &Path, output_dir: &Path) -> Settings {
        use clap::Parser;
        Settings::parse_from([
            "cowrie-triage",
            "--log-dir",
            log_dir.to_str().unwrap(),
            "--output-dir",
            output_dir.to_str().unwrap(),
        ])
    }

    // ── run: single-session scenario (dendrogram skipped by design) ───────────

    #[test]
    fn test_run_single_session_writes_reports_and_skips_dendrogram() {
        let logs = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_log(
            logs.path(),
            "cowrie.json",
            &[
                &command_line("s1", "ls"),
                &command_line("s1", "rm -rf /"),
            ],
        );

        let settings = settings_for(logs.path(), out.path());
        let summary = run(&settings).unwrap();

        assert_eq!(summary.records, 2);
        assert_eq!(summary.pairs, 2);
        assert_eq!(summary.sessions, 1);
        assert_eq!(summary.anomalies, 1);
        assert!(!summary.dendrogram_rendered);

        // "ls" is clean, "rm -rf /" is flagged with distance > 3.
        let content = std::fs::read_to_string(settings.anomalies_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Session ID,Command,Distance");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("s1,rm -rf /,"));
        let distance: usize = lines[1].rsplit(',').next().unwrap().parse().unwrap();
        assert!(distance > 3);

        assert!(settings.matrix_path().exists());
        assert!(!settings.dendrogram_path().exists());
    }

    // ── run: empty log set is a defined empty result ──────────────────────────

    #[test]
    fn test_run_empty_log_dir_is_defined_empty_result() {
        let logs = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let settings = settings_for(logs.path(), out.path());
        let summary = run(&settings).unwrap();

        assert_eq!(
            summary,
            PipelineSummary {
                records: 0,
                pairs: 0,
                sessions: 0,
                anomalies: 0,
                dendrogram_rendered: false,
            }
        );

        // Both CSVs exist with headers only.
        let anomalies = std::fs::read_to_string(settings.anomalies_path()).unwrap();
        assert_eq!(anomalies.trim(), "Session ID,Command,Distance");
        assert!(settings.matrix_path().exists());
    }

    // ── run: malformed-line scenario ──────────────────────────────────────────

    #[test]
    fn test_run_malformed_line_skipped() {
        let logs = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_log(
            logs.path(),
            "cowrie.json",
            &[&command_line("s1", "ls"), "not json"],
        );

        let settings = settings_for(logs.path(), out.path());
        let summary = run(&settings).unwrap();

        assert_eq!(summary.records, 1);
        assert_eq!(summary.pairs, 1);
        assert_eq!(summary.anomalies, 0);
    }

    // ── run: missing log directory is fatal ───────────────────────────────────

    #[test]
    fn test_run_missing_log_dir_is_fatal() {
        let out = TempDir::new().unwrap();
        let settings = settings_for(
            Path::new("/tmp/does-not-exist-cowrie-triage-pipeline"),
            out.path(),
        );

        let err = run(&settings).unwrap_err();
        assert!(matches!(err, TriageError::LogDirNotFound(_)));
    }

    // ── end-to-end scenario through the stages (two sessions) ─────────────────

    #[test]
    fn test_two_session_scenario_through_stages() {
        let logs = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        write_log(
            logs.path(),
            "cowrie.json",
            &[
                &command_line("s1", "ls"),
                &command_line("s2", "rm -rf /"),
            ],
        );
        let settings = settings_for(logs.path(), out.path());

        let records = load_log_records(&settings.log_dir).unwrap();
        let pairs = extract_session_commands(&records);
        let anomalies = detect_anomalies(&pairs, &settings.baseline, settings.threshold);

        // "ls" is in the baseline (distance 0), "rm -rf /" exceeds the
        // threshold against every baseline entry.
        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].session, "s2");
        assert_eq!(anomalies[0].command, "rm -rf /");
        assert!(anomalies[0].distance > 3);

        let matrix = build_distance_matrix(&pairs);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.labels(), &["s1", "s2"]);
        assert!((matrix.get(0, 1) - matrix.get(1, 0)).abs() < f64::EPSILON);

        // Round-trip the anomaly report.
        write_anomalies_csv(&settings.anomalies_path(), &anomalies).unwrap();
        let mut reader = csv::Reader::from_path(settings.anomalies_path()).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "s2");
        assert_eq!(&rows[0][1], "rm -rf /");
        assert_eq!(rows[0][2].parse::<usize>().unwrap(), anomalies[0].distance);

        // The merge tree for two sessions is a single merge at the mean
        // cross distance.
        let tree = cluster_sessions(&matrix, &settings.linkage).unwrap();
        assert_eq!(tree.steps().len(), 1);
        assert!((tree.steps()[0].distance - matrix.get(0, 1)).abs() < 1e-9);
    }
}
