use serde::{Deserialize, Serialize};

/// Cowrie event id emitted for a failed login attempt.
pub const EVENT_LOGIN_FAILED: &str = "cowrie.login.failed";
/// Cowrie event id emitted for a successful login.
pub const EVENT_LOGIN_SUCCESS: &str = "cowrie.login.success";

/// Sentinel session label for records that carry no `session` key.
///
/// Such records are kept rather than dropped so that the analyst still
/// sees their commands; they are bucketed together under this label.
pub const UNKNOWN_SESSION: &str = "<unknown>";

/// One command observed in one honeypot session.
///
/// Login attempts are folded into the same shape by synthesizing the
/// command string as `"<username>/<password>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCommand {
    /// Session token assigned by the honeypot.
    pub session: String,
    /// The command string (verbatim shell input, or credential pair).
    pub command: String,
}

/// A command flagged as anomalous against the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anomaly {
    /// Session the command was observed in.
    pub session: String,
    /// The flagged command string.
    pub command: String,
    /// Minimum Levenshtein distance to any baseline command.
    pub distance: usize,
}

/// Square matrix of mean Levenshtein distances between sessions.
///
/// Row/column order is the first-seen order of the session labels, which
/// keeps output files reproducible across runs. The diagonal holds the
/// self-mean-distance of a session's command list against itself; it is
/// not forced to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    labels: Vec<String>,
    // Row-major, labels.len() * labels.len() cells.
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Build a matrix from labels and row-major cell values.
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != labels.len() * labels.len()`.
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        assert_eq!(
            values.len(),
            labels.len() * labels.len(),
            "distance matrix must be square"
        );
        Self { labels, values }
    }

    /// Number of sessions (matrix side length).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// `true` when the matrix has no sessions at all.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Session labels in row/column order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Cell (i, j).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.labels.len() + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        let n = self.labels.len();
        &self.values[i * n..(i + 1) * n]
    }

    /// Condensed upper-triangle vector in row-major (i, j), i < j order.
    ///
    /// This is the dissimilarity form the clustering routine consumes;
    /// dropping the diagonal here also sidesteps the nonzero self-distance
    /// the full matrix carries.
    pub fn condensed(&self) -> Vec<f64> {
        let n = self.labels.len();
        let mut out = Vec::with_capacity(n.saturating_sub(1) * n / 2);
        for i in 0..n {
            for j in (i + 1)..n {
                out.push(self.get(i, j));
            }
        }
        out
    }
}
