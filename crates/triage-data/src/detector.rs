//! Baseline anomaly scoring.
//!
//! Each session-command pair is scored by its minimum Levenshtein
//! distance to the baseline; pairs whose minimum exceeds the threshold
//! are flagged. No deduplication: a repeated anomalous command produces
//! one record per occurrence.

use tracing::debug;
use triage_core::distance::min_distance_to_baseline;
use triage_core::models::{Anomaly, SessionCommand};

/// Score every pair against the baseline and return the flagged ones,
/// in input order.
///
/// An empty baseline flags nothing: with no reference commands there is
/// no minimum distance to compare against.
pub fn detect_anomalies(
    pairs: &[SessionCommand],
    baseline: &[String],
    threshold: usize,
) -> Vec<Anomaly> {
    let mut anomalies: Vec<Anomaly> = Vec::new();

    for pair in pairs {
        let Some(min_distance) = min_distance_to_baseline(&pair.command, baseline) else {
            continue;
        };
        if min_distance > threshold {
            anomalies.push(Anomaly {
                session: pair.session.clone(),
                command: pair.command.clone(),
                distance: min_distance,
            });
        }
    }

    debug!(
        "Scored {} pairs, flagged {} anomalies",
        pairs.len(),
        anomalies.len()
    );
    anomalies
}

// ── Tests ─────────────────────────────────────────────────────────────────────
