//! All-pairs session distance matrix.
//!
//! Cell (i, j) is the arithmetic mean of Levenshtein distances over the
//! full cross product of session i's and session j's command lists. This
//! is O(S² · C²) in the session count and commands per session, the
//! pipeline's only genuine scaling concern; acceptable for the small to
//! moderate log volumes a single honeypot produces.

use std::collections::HashMap;

use tracing::debug;
use triage_core::distance::levenshtein;
use triage_core::models::{DistanceMatrix, SessionCommand};

/// Build the mean-distance matrix over all distinct sessions.
///
/// Session labels are ordered by first appearance in the pair stream so
/// that matrix rows and columns are stable across runs. The diagonal is
/// the self-mean-distance, computed the same way as every other cell.
pub fn build_distance_matrix(pairs: &[SessionCommand]) -> DistanceMatrix {
    let mut order: Vec<&str> = Vec::new();
    let mut commands: HashMap<&str, Vec<&str>> = HashMap::new();

    for pair in pairs {
        let entry = commands.entry(pair.session.as_str()).or_default();
        if entry.is_empty() {
            order.push(pair.session.as_str());
        }
        entry.push(pair.command.as_str());
    }

    let n = order.len();
    let mut values = Vec::with_capacity(n * n);
    for &session_i in &order {
        for &session_j in &order {
            values.push(mean_cross_distance(
                &commands[session_i],
                &commands[session_j],
            ));
        }
    }

    debug!("Built {n}x{n} distance matrix from {} pairs", pairs.len());
    DistanceMatrix::new(order.into_iter().map(String::from).collect(), values)
}

/// Mean Levenshtein distance over the cross product of two command lists.
///
/// An empty cross product (a session with no commands, which extraction
/// should never produce) yields 0.0 rather than a NaN.
fn mean_cross_distance(left: &[&str], right: &[&str]) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let mut total = 0usize;
    for a in left {
        for b in right {
            total += levenshtein(a, b);
        }
    }
    total as f64 / (left.len() * right.len()) as f64
}

// ── Tests ─────────────────────────────────────────────────────────────────────
