//! CSV report writing.
//!
//! Serializes the anomaly list and the distance matrix to flat files.
//! Both writers silently overwrite an existing file at the same path.

use std::path::Path;

use tracing::info;
use triage_core::models::{Anomaly, DistanceMatrix};
use triage_core::{Result, TriageError};

/// Write the anomaly report: header `Session ID,Command,Distance`, one
/// row per flagged anomaly, input order preserved.
pub fn write_anomalies_csv(path: &Path, anomalies: &[Anomaly]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| report_err(path, source))?;

    writer
        .write_record(["Session ID", "Command", "Distance"])
        .map_err(|source| report_err(path, source))?;
    for anomaly in anomalies {
        writer
            .write_record([
                anomaly.session.as_str(),
                anomaly.command.as_str(),
                &anomaly.distance.to_string(),
            ])
            .map_err(|source| report_err(path, source))?;
    }
    writer
        .flush()
        .map_err(|source| report_err(path, csv::Error::from(source)))?;

    info!("{} anomalies saved to {}", anomalies.len(), path.display());
    Ok(())
}

/// Write the distance matrix with a header row of session labels (leading
/// empty cell) and one labelled row per session.
pub fn write_distance_matrix_csv(path: &Path, matrix: &DistanceMatrix) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|source| report_err(path, source))?;

    let mut header: Vec<&str> = vec![""];
    header.extend(matrix.labels().iter().map(String::as_str));
    writer
        .write_record(&header)
        .map_err(|source| report_err(path, source))?;

    for (i, label) in matrix.labels().iter().enumerate() {
        let mut row: Vec<String> = Vec::with_capacity(matrix.len() + 1);
        row.push(label.clone());
        row.extend(matrix.row(i).iter().map(|v| v.to_string()));
        writer
            .write_record(&row)
            .map_err(|source| report_err(path, source))?;
    }
    writer
        .flush()
        .map_err(|source| report_err(path, csv::Error::from(source)))?;

    info!("Distance matrix saved to {}", path.display());
    Ok(())
}

fn report_err(path: &Path, source: csv::Error) -> TriageError {
    TriageError::ReportWrite {
        path: path.to_path_buf(),
        source,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
