//! Levenshtein distance primitives.
//!
//! Classic edit distance over Unicode code points: insertions, deletions
//! and substitutions each cost 1. This is the single scoring primitive
//! the whole pipeline is built on.

/// Levenshtein distance between `a` and `b`.
///
/// Two-row dynamic programming over the `char` sequences of both inputs,
/// so multi-byte code points count as single edits.
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Minimum Levenshtein distance from `command` to any baseline entry.
///
/// Returns `None` for an empty baseline (no minimum exists).
pub fn min_distance_to_baseline(command: &str, baseline: &[String]) -> Option<usize> {
    baseline
        .iter()
        .map(|known| levenshtein(command, known))
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── levenshtein ───────────────────────────────────────────────────────────

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("ls", "ls"), 0);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn test_levenshtein_classic_example() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_empty_sides() {
        assert_eq!(levenshtein("", "whoami"), 6);
        assert_eq!(levenshtein("whoami", ""), 6);
    }

    #[test]
    fn test_levenshtein_single_substitution() {
        assert_eq!(levenshtein("cat", "cut"), 1);
    }

    #[test]
    fn test_levenshtein_insert_and_delete() {
        assert_eq!(levenshtein("cd", "cde"), 1);
        assert_eq!(levenshtein("echo", "eco"), 1);
    }

    #[test]
    fn test_levenshtein_symmetry() {
        let pairs = [("ls", "rm -rf /"), ("pwd", "passwd"), ("uname", "")];
        for (a, b) in pairs {
            assert_eq!(levenshtein(a, b), levenshtein(b, a));
        }
    }

    #[test]
    fn test_levenshtein_unicode_code_points() {
        // One substitution, not a byte-level diff.
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("日本語", "日本"), 1);
    }

    #[test]
    fn test_levenshtein_transposition_costs_two() {
        // Plain Levenshtein: a swap is one delete plus one insert.
        assert_eq!(levenshtein("ab", "ba"), 2);
    }

    // ── min_distance_to_baseline ──────────────────────────────────────────────

    #[test]
    fn test_min_distance_baseline_verbatim_is_zero() {
        let baseline = vec!["ls".to_string(), "pwd".to_string()];
        assert_eq!(min_distance_to_baseline("pwd", &baseline), Some(0));
    }

    #[test]
    fn test_min_distance_picks_closest_entry() {
        let baseline = vec!["ls".to_string(), "cat".to_string(), "touch".to_string()];
        // "cut" is 1 away from "cat", further from the rest.
        assert_eq!(min_distance_to_baseline("cut", &baseline), Some(1));
    }

    #[test]
    fn test_min_distance_empty_baseline() {
        assert_eq!(min_distance_to_baseline("ls", &[]), None);
    }
}
