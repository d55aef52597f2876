//! Hierarchical agglomerative clustering over the session distance matrix.
//!
//! The matrix is condensed to its upper triangle (dropping the nonzero
//! self-mean diagonal) and fed to `kodama`. The resulting merge tree is
//! wrapped in [`ClusterTree`], which also derives the display leaf order
//! for the dendrogram.

use kodama::{linkage, Method};
use tracing::debug;
use triage_core::models::DistanceMatrix;
use triage_core::{Result, TriageError};

/// One merge in the agglomerative sequence.
///
/// Cluster ids follow the usual linkage convention: ids `0..n` are the
/// original sessions (leaves), and the cluster created by merge `k` has
/// id `n + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeStep {
    /// Id of the first merged cluster.
    pub left: usize,
    /// Id of the second merged cluster.
    pub right: usize,
    /// Linkage dissimilarity at which the merge happened.
    pub distance: f64,
    /// Number of leaves in the merged cluster.
    pub size: usize,
}

/// The full binary merge tree over `observations` sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterTree {
    observations: usize,
    steps: Vec<MergeStep>,
}

impl ClusterTree {
    /// Number of leaves (sessions) in the tree.
    pub fn observations(&self) -> usize {
        self.observations
    }

    /// Merge steps in nondecreasing dissimilarity order.
    pub fn steps(&self) -> &[MergeStep] {
        &self.steps
    }

    /// Largest merge dissimilarity in the tree.
    pub fn max_distance(&self) -> f64 {
        self.steps.iter().map(|s| s.distance).fold(0.0, f64::max)
    }

    /// Merge height of a cluster id: 0 for leaves, the merge
    /// dissimilarity for internal nodes.
    fn height(&self, id: usize) -> f64 {
        if id < self.observations {
            0.0
        } else {
            self.steps[id - self.observations].distance
        }
    }

    /// Leaf ids in display order.
    ///
    /// The tree is walked from the root with the higher-distance subtree
    /// first, giving the descending distance sort the dendrogram display
    /// uses.
    pub fn leaf_order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.observations);
        if self.steps.is_empty() {
            order.extend(0..self.observations);
            return order;
        }
        let root = self.observations + self.steps.len() - 1;
        self.collect_leaves(root, &mut order);
        order
    }

    fn collect_leaves(&self, id: usize, out: &mut Vec<usize>) {
        if id < self.observations {
            out.push(id);
            return;
        }
        let step = &self.steps[id - self.observations];
        let (first, second) = if self.height(step.right) > self.height(step.left) {
            (step.right, step.left)
        } else {
            (step.left, step.right)
        };
        self.collect_leaves(first, out);
        self.collect_leaves(second, out);
    }
}

/// Map a linkage method name from the CLI to a `kodama` method.
pub fn parse_linkage_method(name: &str) -> Result<Method> {
    match name {
        "average" => Ok(Method::Average),
        "single" => Ok(Method::Single),
        "complete" => Ok(Method::Complete),
        "weighted" => Ok(Method::Weighted),
        other => Err(TriageError::UnknownLinkage(other.to_string())),
    }
}

/// Run hierarchical clustering over `matrix` with the named method.
///
/// Fewer than two sessions is degenerate input: there is nothing to
/// merge, and the caller is expected to skip the dendrogram instead of
/// treating this as a crash.
pub fn cluster_sessions(matrix: &DistanceMatrix, method_name: &str) -> Result<ClusterTree> {
    let method = parse_linkage_method(method_name)?;
    let n = matrix.len();
    if n < 2 {
        return Err(TriageError::DegenerateInput(format!(
            "{} session(s), need at least 2 to cluster",
            n
        )));
    }

    let mut condensed = matrix.condensed();
    let dendrogram = linkage(&mut condensed, n, method);

    let steps = dendrogram
        .steps()
        .iter()
        .map(|s| MergeStep {
            left: s.cluster1,
            right: s.cluster2,
            distance: s.dissimilarity,
            size: s.size,
        })
        .collect::<Vec<_>>();

    debug!("Clustered {} sessions in {} merges", n, steps.len());
    Ok(ClusterTree {
        observations: n,
        steps,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// 3 sessions where a and b are close (1.0) and c is far (10.0).
    fn three_session_matrix() -> DistanceMatrix {
        DistanceMatrix::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                0.0, 1.0, 10.0, //
                1.0, 0.0, 10.0, //
                10.0, 10.0, 0.0,
            ],
        )
    }

    // ── parse_linkage_method ──────────────────────────────────────────────────

    #[test]
    fn test_parse_linkage_method_known() {
        assert!(parse_linkage_method("average").is_ok());
        assert!(parse_linkage_method("single").is_ok());
        assert!(parse_linkage_method("complete").is_ok());
        assert!(parse_linkage_method("weighted").is_ok());
    }

    #[test]
    fn test_parse_linkage_method_unknown() {
        let err = parse_linkage_method("centroid").unwrap_err();
        assert!(matches!(err, TriageError::UnknownLinkage(_)));
    }

    // ── cluster_sessions ──────────────────────────────────────────────────────

    #[test]
    fn test_cluster_merges_closest_pair_first() {
        let tree = cluster_sessions(&three_session_matrix(), "average").unwrap();

        assert_eq!(tree.observations(), 3);
        assert_eq!(tree.steps().len(), 2);

        let first = &tree.steps()[0];
        let mut merged = [first.left, first.right];
        merged.sort_unstable();
        assert_eq!(merged, [0, 1]);
        assert!((first.distance - 1.0).abs() < 1e-9);
        assert_eq!(first.size, 2);

        // Second merge joins the {a, b} cluster (id 3) with leaf c at the
        // average of the two cross distances: (10 + 10) / 2 = 10.
        let second = &tree.steps()[1];
        let mut merged = [second.left, second.right];
        merged.sort_unstable();
        assert_eq!(merged, [2, 3]);
        assert!((second.distance - 10.0).abs() < 1e-9);
        assert_eq!(second.size, 3);
    }

    #[test]
    fn test_cluster_max_distance() {
        let tree = cluster_sessions(&three_session_matrix(), "average").unwrap();
        assert!((tree.max_distance() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_leaf_order_visits_every_leaf_once() {
        let tree = cluster_sessions(&three_session_matrix(), "average").unwrap();
        let mut order = tree.leaf_order();
        assert_eq!(order.len(), 3);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_leaf_order_descending_distance_sort() {
        let tree = cluster_sessions(&three_session_matrix(), "average").unwrap();
        // At the root the {a, b} subtree has merge height 1.0, leaf c has
        // height 0, so the subtree comes first and c is displayed last.
        let order = tree.leaf_order();
        assert_eq!(order[2], 2);
    }

    #[test]
    fn test_cluster_single_session_is_degenerate() {
        let matrix = DistanceMatrix::new(vec!["only".to_string()], vec![0.0]);
        let err = cluster_sessions(&matrix, "average").unwrap_err();
        assert!(matches!(err, TriageError::DegenerateInput(_)));
    }

    #[test]
    fn test_cluster_empty_matrix_is_degenerate() {
        let matrix = DistanceMatrix::new(vec![], vec![]);
        let err = cluster_sessions(&matrix, "average").unwrap_err();
        assert!(matches!(err, TriageError::DegenerateInput(_)));
    }

    #[test]
    fn test_cluster_unknown_method_propagates() {
        let err = cluster_sessions(&three_session_matrix(), "ward-ish").unwrap_err();
        assert!(matches!(err, TriageError::UnknownLinkage(_)));
    }
}
